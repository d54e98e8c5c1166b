//! Full-text search provider trait.
//!
//! A [`TextSearchProvider`] answers a free-text query with a relevance
//! ranked list of book ids and the number of distinct books that match.
//! The books themselves are always loaded from the relational store.

use async_trait::async_trait;

use crate::error::{BackendError, StorageResult};
use crate::types::{PageWindow, Predicate};

/// The ranked ids for one page plus the distinct total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSearchHits {
    /// Book ids in relevance order.
    pub ids: Vec<i64>,

    /// Number of distinct books matching the search and the predicate.
    pub distinct_total: u64,
}

/// Provider for free-text search over book documents.
///
/// The predicate restricts both the count and the ranked ids, so the two
/// always describe the same set of books.
#[async_trait]
pub trait TextSearchProvider: Send + Sync {
    /// Returns a human-readable name for this provider.
    fn provider_name(&self) -> &'static str;

    /// Counts the distinct books matching `term` and `predicate`.
    async fn count_matches(&self, term: &str, predicate: &Predicate) -> StorageResult<u64>;

    /// Returns one window of matching book ids, most relevant first.
    ///
    /// Each book appears at most once.
    async fn ranked_ids(
        &self,
        term: &str,
        predicate: &Predicate,
        window: PageWindow,
    ) -> StorageResult<Vec<i64>>;

    /// Returns how many leading results the engine can page through, if
    /// it is limited.
    fn max_window(&self) -> Option<u64> {
        None
    }

    /// Runs the count and window queries concurrently.
    async fn search(
        &self,
        term: &str,
        predicate: &Predicate,
        window: PageWindow,
    ) -> StorageResult<TextSearchHits> {
        let (distinct_total, ids) = tokio::try_join!(
            self.count_matches(term, predicate),
            self.ranked_ids(term, predicate, window),
        )?;
        Ok(TextSearchHits {
            ids,
            distinct_total,
        })
    }

    /// Checks that the search engine is reachable.
    async fn health_check(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
