//! In-memory full-text provider.

use async_trait::async_trait;

use folio_persistence::core::TextSearchProvider;
use folio_persistence::error::StorageResult;
use folio_persistence::types::{BookRecord, PageWindow, Predicate};

/// Ranks documents by the order they were added, matching titles by
/// case-insensitive substring.
///
/// Documents may name books the relational store no longer has, and may
/// repeat a book, the way a lagging index mirror can.
#[derive(Debug, Default)]
pub struct InMemorySearch {
    documents: Vec<BookRecord>,
}

impl InMemorySearch {
    pub fn new(documents: Vec<BookRecord>) -> Self {
        Self { documents }
    }

    fn matching(&self, term: &str, predicate: &Predicate) -> Vec<i64> {
        let term = term.to_lowercase();
        let mut ids: Vec<i64> = Vec::new();
        for doc in &self.documents {
            let hit = term
                .split_whitespace()
                .any(|word| doc.title.to_lowercase().contains(word));
            if hit && predicate.matches(doc) && !ids.contains(&doc.id) {
                ids.push(doc.id);
            }
        }
        ids
    }
}

#[async_trait]
impl TextSearchProvider for InMemorySearch {
    fn provider_name(&self) -> &'static str {
        "in-memory"
    }

    async fn count_matches(&self, term: &str, predicate: &Predicate) -> StorageResult<u64> {
        Ok(self.matching(term, predicate).len() as u64)
    }

    async fn ranked_ids(
        &self,
        term: &str,
        predicate: &Predicate,
        window: PageWindow,
    ) -> StorageResult<Vec<i64>> {
        Ok(self
            .matching(term, predicate)
            .into_iter()
            .skip(window.offset as usize)
            .take(window.limit as usize)
            .collect())
    }
}
