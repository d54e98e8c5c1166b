//! Test data fixtures.

use async_trait::async_trait;

use folio_persistence::core::TextSearchProvider;
use folio_persistence::error::{BackendError, StorageError, StorageResult};
use folio_persistence::types::{Author, BookRecord, PageWindow, Predicate};

/// Seed books.
///
/// Default order (most downloaded first) is 4, 1, 2, 3, 5.
pub fn books() -> Vec<BookRecord> {
    vec![
        BookRecord::new(1, 120, "Treasure Island")
            .with_download_count(900)
            .with_author(
                Author::new(1, "Stevenson, Robert Louis").with_years(Some(1850), Some(1894)),
            )
            .with_subject(1, "Pirates -- Juvenile fiction")
            .with_bookshelf(1, "Adventure")
            .with_language(1, "en")
            .with_format("text/plain", "https://www.gutenberg.org/ebooks/120.txt.utf-8"),
        BookRecord::new(2, 2701, "Moby Dick; Or, The Whale")
            .with_download_count(700)
            .with_author(Author::new(2, "Melville, Herman"))
            .with_subject(2, "Whaling -- Fiction")
            .with_bookshelf(2, "Sea Stories")
            .with_language(1, "en")
            .with_format("text/html", "https://www.gutenberg.org/ebooks/2701.html.images"),
        BookRecord::new(3, 5097, "Vingt mille lieues sous les mers")
            .with_download_count(500)
            .with_author(Author::new(3, "Verne, Jules"))
            .with_subject(3, "Sea voyages -- Fiction")
            .with_language(2, "fr")
            .with_format("application/epub+zip", "https://www.gutenberg.org/ebooks/5097.epub"),
        BookRecord::new(4, 11, "Alice's Adventures in Wonderland")
            .with_download_count(1500)
            .with_author(Author::new(4, "Carroll, Lewis"))
            .with_subject(4, "Fantasy fiction")
            .with_bookshelf(3, "Children's Literature")
            .with_language(1, "en")
            .with_format("text/plain", "https://www.gutenberg.org/ebooks/11.txt.utf-8")
            .with_format("text/plain; charset=us-ascii", "https://www.gutenberg.org/files/11/11-0.txt")
            .with_format("application/epub+zip", "https://www.gutenberg.org/ebooks/11.epub"),
        BookRecord::new(5, 2229, "Faust")
            .with_download_count(100)
            .with_author(Author::new(5, "Goethe, Johann Wolfgang von"))
            .with_subject(5, "Drama")
            .with_language(3, "de")
            .with_format("text/html", "https://www.gutenberg.org/ebooks/2229.html.images"),
    ]
}

/// Ranks documents in insertion order, matching any word of the term
/// against the title.
pub struct InMemorySearch {
    documents: Vec<BookRecord>,
    max_window: Option<u64>,
}

impl InMemorySearch {
    pub fn new(documents: Vec<BookRecord>) -> Self {
        Self {
            documents,
            max_window: None,
        }
    }

    /// Limits how deep the index can page.
    pub fn with_max_window(mut self, max_window: u64) -> Self {
        self.max_window = Some(max_window);
        self
    }

    fn matching(&self, term: &str, predicate: &Predicate) -> Vec<i64> {
        let term = term.to_lowercase();
        let mut ids: Vec<i64> = Vec::new();
        for doc in &self.documents {
            let title = doc.title.to_lowercase();
            let hit = term.split_whitespace().any(|word| title.contains(word));
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

    fn max_window(&self) -> Option<u64> {
        self.max_window
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

/// A search engine that cannot be reached.
pub struct UnreachableSearch;

fn unreachable_error() -> BackendError {
    BackendError::Unavailable {
        backend_name: "elasticsearch".to_string(),
        message: "connection refused".to_string(),
    }
}

#[async_trait]
impl TextSearchProvider for UnreachableSearch {
    fn provider_name(&self) -> &'static str {
        "elasticsearch"
    }

    async fn count_matches(&self, _: &str, _: &Predicate) -> StorageResult<u64> {
        Err(StorageError::Backend(unreachable_error()))
    }

    async fn ranked_ids(&self, _: &str, _: &Predicate, _: PageWindow) -> StorageResult<Vec<i64>> {
        Err(StorageError::Backend(unreachable_error()))
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        Err(unreachable_error())
    }
}
