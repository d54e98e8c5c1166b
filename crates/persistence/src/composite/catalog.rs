//! CompositeCatalog implementation.
//!
//! `CompositeCatalog` answers a [`BookQuery`] by choosing the count
//! authority and the ordering source for the request, then loading the page
//! from the relational store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::core::{BookCatalog, BookStorage, TextSearchProvider, preserve_rank_order};
use crate::error::{BackendError, ResourceError, SearchError, StorageResult};
use crate::types::{
    BookPage, BookQuery, BookRecord, CountAuthority, PageRequest, Predicate, SortDirective,
};

/// A dynamically typed relational store.
pub type DynStorage = Arc<dyn BookStorage>;

/// A dynamically typed search provider.
pub type DynSearchProvider = Arc<dyn TextSearchProvider>;

/// Catalog combining a relational store with an optional search index.
#[derive(Clone)]
pub struct CompositeCatalog {
    /// Source of truth for books.
    primary: DynStorage,

    /// Relevance ranking, when configured.
    search: Option<DynSearchProvider>,
}

impl std::fmt::Debug for CompositeCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeCatalog")
            .field("primary", &self.primary.backend_name())
            .field(
                "search",
                &self.search.as_ref().map(|s| s.provider_name()),
            )
            .finish()
    }
}

impl CompositeCatalog {
    /// Creates a catalog backed only by a relational store.
    pub fn new(primary: DynStorage) -> Self {
        Self {
            primary,
            search: None,
        }
    }

    /// Adds a search index for free-text queries.
    pub fn with_search(mut self, search: DynSearchProvider) -> Self {
        self.search = Some(search);
        self
    }

    /// Returns true if free-text search is available.
    pub fn has_search(&self) -> bool {
        self.search.is_some()
    }

    /// Lists books without a search term: the relational store counts,
    /// orders and windows.
    async fn browse(
        &self,
        predicate: &Predicate,
        sort: &[SortDirective],
        page: PageRequest,
    ) -> StorageResult<BookPage> {
        let total = self.primary.count_books(predicate).await?;
        page.ensure_in_range(total)?;

        let items = if total == 0 {
            Vec::new()
        } else {
            self.primary
                .find_books(predicate, sort, page.window())
                .await?
        };

        Ok(BookPage::new(items, CountAuthority::Relational(total), page))
    }

    /// Lists books for a search term: the index counts and ranks, the
    /// relational store loads.
    async fn search(
        &self,
        term: &str,
        predicate: &Predicate,
        page: PageRequest,
    ) -> StorageResult<BookPage> {
        let provider = self
            .search
            .as_ref()
            .ok_or(SearchError::TextSearchNotAvailable)?;

        if let Some(max_window) = provider.max_window() {
            page.window().ensure_within(max_window)?;
        }

        let hits = provider
            .search(term, predicate, page.window())
            .await
            .inspect_err(|e| {
                warn!(provider = provider.provider_name(), error = %e, "Text search failed");
            })?;
        page.ensure_in_range(hits.distinct_total)?;

        let items = if hits.ids.is_empty() {
            Vec::new()
        } else {
            let books = self.primary.fetch_books(&hits.ids, predicate).await?;
            preserve_rank_order(&hits.ids, books)
        };

        Ok(BookPage::new(
            items,
            CountAuthority::SearchIndex(hits.distinct_total),
            page,
        ))
    }
}

#[async_trait]
impl BookCatalog for CompositeCatalog {
    #[instrument(skip(self, query), fields(page = query.page.page, page_size = query.page.page_size))]
    async fn list_books(&self, query: &BookQuery) -> StorageResult<BookPage> {
        let predicate = query.predicate();

        match query.search_term() {
            Some(term) => {
                debug!(term, "Listing books by relevance");
                self.search(term, &predicate, query.page).await
            }
            None => {
                debug!(sort = ?query.sort, "Listing books");
                self.browse(&predicate, &query.sort, query.page).await
            }
        }
    }

    async fn get_book(&self, id: i64) -> StorageResult<BookRecord> {
        self.primary
            .get_book(id)
            .await?
            .ok_or_else(|| ResourceError::NotFound { id }.into())
    }

    async fn health_check(&self) -> Vec<(&'static str, Result<(), BackendError>)> {
        let mut report = vec![(
            self.primary.backend_name(),
            self.primary.health_check().await,
        )];
        if let Some(search) = &self.search {
            report.push((search.provider_name(), search.health_check().await));
        }
        report
    }
}
