//! Folio Persistence Layer
//!
//! This crate provides the storage and search side of the Folio book catalog.
//! It translates catalog requests (filters, free-text search, ordering and
//! paging) into queries against a relational store and an optional full-text
//! index, and reconciles the two into one consistent page of books.
//!
//! # Features
//!
//! - **Relational Store**: SQLite with in-memory and file modes (`sqlite`)
//! - **Full-Text Search**: Elasticsearch with fuzzy multi-field matching (`elasticsearch`)
//! - **Composable Filters**: per-dimension OR, cross-dimension AND predicate trees
//! - **Count Reconciliation**: distinct counts from either store, never raw hit counts
//!
//! # Architecture
//!
//! - [`types`] - Book records, filters, predicates, ordering and pagination
//! - [`error`] - Error types for all operations
//! - [`core`] - Storage and search traits plus the order-preserving join
//! - [`composite`] - The catalog that combines a relational store with a search index
//! - [`backends`] - Backend implementations (SQLite, Elasticsearch)
//!
//! # Quick Start
//!
//! ```
//! use folio_persistence::types::{BookFilter, BookQuery, PageRequest, SortDirective};
//!
//! let filter = BookFilter {
//!     topic: vec!["pirates".to_string(), "sea".to_string()],
//!     language: vec!["en".to_string()],
//!     ..Default::default()
//! };
//!
//! let query = BookQuery::new(filter)
//!     .with_sort(SortDirective::parse("-download_count"))
//!     .with_page(PageRequest::new(2, 10));
//!
//! assert_eq!(query.page.window().offset, 10);
//! assert!(query.search_term().is_none());
//! ```
//!
//! # Search
//!
//! When a request carries a non-empty search term, the
//! [`CompositeCatalog`](composite::CompositeCatalog) asks its
//! [`TextSearchProvider`](core::TextSearchProvider) for the ranked page of
//! book ids and the distinct match count, loads the books from the
//! relational store and restores the relevance order. Without a search term
//! the relational store answers alone.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod composite;
pub mod core;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{BookFilter, BookPage, BookQuery, BookRecord, PageRequest, Predicate};

// Re-export core traits
pub use core::{Backend, BackendKind, BookCatalog, BookStorage, TextSearchProvider};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
