//! Relational storage and catalog traits.
//!
//! [`BookStorage`] is the relational side: it evaluates predicates, orders
//! and windows listings, and loads books with their related collections.
//! [`BookCatalog`] is what the HTTP layer talks to; it answers a whole
//! [`BookQuery`] with one [`BookPage`].

use async_trait::async_trait;

use crate::error::{BackendError, StorageResult};
use crate::types::{BookPage, BookQuery, BookRecord, PageWindow, Predicate, SortDirective};

/// Relational storage for books.
///
/// Every method returns books with authors, subjects, bookshelves,
/// languages and formats loaded, and never returns the same book twice.
///
/// # Example
///
/// ```ignore
/// use folio_persistence::core::BookStorage;
/// use folio_persistence::types::{BookFilter, PageRequest, SortDirective};
///
/// async fn most_downloaded<S: BookStorage>(storage: &S) -> StorageResult<()> {
///     let predicate = BookFilter::default().to_predicate();
///     let window = PageRequest::new(1, 10).window();
///     let books = storage
///         .find_books(&predicate, &SortDirective::default_ordering(), window)
///         .await?;
///     for book in books {
///         println!("{} ({} downloads)", book.title, book.download_count);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait BookStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Counts the distinct books matching the predicate.
    async fn count_books(&self, predicate: &Predicate) -> StorageResult<u64>;

    /// Returns one window of the books matching the predicate.
    ///
    /// Books are sorted by `sort`, then by id ascending.
    async fn find_books(
        &self,
        predicate: &Predicate,
        sort: &[SortDirective],
        window: PageWindow,
    ) -> StorageResult<Vec<BookRecord>>;

    /// Loads the books with the given ids that still match the predicate.
    ///
    /// Ids without a matching book are skipped. The order of the result is
    /// unspecified; see [`preserve_rank_order`](super::preserve_rank_order).
    async fn fetch_books(
        &self,
        ids: &[i64],
        predicate: &Predicate,
    ) -> StorageResult<Vec<BookRecord>>;

    /// Loads a single book.
    async fn get_book(&self, id: i64) -> StorageResult<Option<BookRecord>>;

    /// Checks that the store is answering queries.
    async fn health_check(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

/// A catalog answering complete listing requests.
#[async_trait]
pub trait BookCatalog: Send + Sync {
    /// Returns the requested page of books.
    ///
    /// # Errors
    ///
    /// * `SearchError::PageOutOfRange` - a page after the first lies past the end
    /// * `SearchError::TextSearchNotAvailable` - a search term was given but no
    ///   search index is configured
    /// * `BackendError` - a store failed
    async fn list_books(&self, query: &BookQuery) -> StorageResult<BookPage>;

    /// Returns a single book, or `ResourceError::NotFound`.
    async fn get_book(&self, id: i64) -> StorageResult<BookRecord>;

    /// Checks every store behind the catalog.
    ///
    /// Returns the name and outcome of each check.
    async fn health_check(&self) -> Vec<(&'static str, Result<(), BackendError>)>;
}
