//! Pagination types for catalog listings.
//!
//! Listings are paged by a 1-based page number and a page size. The total
//! reported to clients comes from exactly one store per request, recorded
//! explicitly as a [`CountAuthority`].

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

use super::BookRecord;

/// Default number of books per page.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Upper bound applied to client supplied page sizes.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A requested page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,

    /// Number of books per page.
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Creates a page request. Zero values are raised to one.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Caps the page size at `max_page_size`.
    pub fn clamped(mut self, max_page_size: u32) -> Self {
        self.page_size = self.page_size.min(max_page_size.max(1));
        self
    }

    /// Returns the offset/limit window for this page.
    pub fn window(&self) -> PageWindow {
        PageWindow {
            offset: u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size),
            limit: self.page_size,
        }
    }

    /// Returns true if books exist after this page.
    pub fn has_next(&self, total: u64) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < total
    }

    /// Returns true if this is not the first page.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Checks that this page exists for `total` matching books.
    ///
    /// The first page always exists, even when nothing matches.
    pub fn ensure_in_range(&self, total: u64) -> Result<(), SearchError> {
        if self.page > 1 && self.window().offset >= total {
            return Err(SearchError::PageOutOfRange {
                page: self.page,
                total,
            });
        }
        Ok(())
    }
}

/// An offset/limit slice of an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Number of leading results to skip.
    pub offset: u64,

    /// Maximum number of results to return.
    pub limit: u32,
}

impl PageWindow {
    /// Returns the position just past the last result of this window.
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(u64::from(self.limit))
    }

    /// Checks that this window fits within the first `max_window` results.
    pub fn ensure_within(&self, max_window: u64) -> Result<(), SearchError> {
        if self.end() > max_window {
            return Err(SearchError::WindowTooDeep { max_window });
        }
        Ok(())
    }
}

/// The store whose count is reported for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountAuthority {
    /// Distinct matching books counted by the relational store.
    Relational(u64),

    /// Distinct matching books counted by the search index.
    SearchIndex(u64),
}

impl CountAuthority {
    /// Returns the authoritative total.
    pub fn total(&self) -> u64 {
        match self {
            CountAuthority::Relational(n) | CountAuthority::SearchIndex(n) => *n,
        }
    }

    /// Returns true if the count came from the search index.
    pub fn is_search_index(&self) -> bool {
        matches!(self, CountAuthority::SearchIndex(_))
    }
}

/// One page of books plus the information needed to build its envelope.
#[derive(Debug, Clone)]
pub struct BookPage {
    /// The books on this page, in presentation order.
    pub items: Vec<BookRecord>,

    /// Where the total came from.
    pub count: CountAuthority,

    /// The page that was served.
    pub page: PageRequest,
}

impl BookPage {
    /// Creates a new page.
    pub fn new(items: Vec<BookRecord>, count: CountAuthority, page: PageRequest) -> Self {
        Self { items, count, page }
    }

    /// Returns the total number of matching books.
    pub fn total(&self) -> u64 {
        self.count.total()
    }

    /// Returns true if books exist after this page.
    pub fn has_next(&self) -> bool {
        self.page.has_next(self.total())
    }

    /// Returns true if this is not the first page.
    pub fn has_previous(&self) -> bool {
        self.page.has_previous()
    }

    /// Returns true if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
