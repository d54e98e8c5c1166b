//! Composite catalog over a relational store and a search index.
//!
//! The relational store is the single source of truth for books. The
//! search index, when configured, only ranks: it answers a free-text query
//! with book ids and a distinct count, and the books are then loaded from
//! the relational store and put back into rank order.
//!
//! # Valid Configurations
//!
//! | Configuration | Relational | Search | Free-text search |
//! |---------------|------------|--------|------------------|
//! | SQLite-only | SQLite | None | 501 Not Implemented |
//! | SQLite + ES | SQLite | Elasticsearch | Fuzzy multi-field |
//!
//! # Count Authority
//!
//! | Request | Count from | Order |
//! |---------|-----------|-------|
//! | No search term | Relational store | `ordering`, then id |
//! | Search term | Search index (distinct ids) | Relevance |
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use folio_persistence::backends::sqlite::SqliteBackend;
//! use folio_persistence::composite::CompositeCatalog;
//!
//! let sqlite = Arc::new(SqliteBackend::open("folio.db")?);
//! let catalog = CompositeCatalog::new(sqlite.clone()).with_search(es_backend);
//! let page = catalog.list_books(&query).await?;
//! ```

mod catalog;

pub use catalog::{CompositeCatalog, DynSearchProvider, DynStorage};
