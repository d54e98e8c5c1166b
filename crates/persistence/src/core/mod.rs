//! Core storage traits and abstractions.
//!
//! This module provides the foundational traits for the persistence layer:
//!
//! - [`Backend`] - Store lifecycle (initialization and health checks)
//! - [`BookStorage`] - Relational filtering, ordering and eager loading
//! - [`TextSearchProvider`] - Relevance ranked free-text search
//! - [`BookCatalog`] - Complete listing requests, as served over HTTP
//! - [`preserve_rank_order`] - Joining ranked ids with loaded books
//!
//! # Data Flow
//!
//! ```text
//! BookQuery
//!     ├── no search term ── BookStorage::count_books + find_books ──────────┐
//!     └── search term ───── TextSearchProvider::search (count ∥ window)     │
//!                               └── BookStorage::fetch_books                 │
//!                                       └── preserve_rank_order ─────────────┴── BookPage
//! ```

pub mod backend;
pub mod join;
pub mod search;
pub mod storage;

// Re-export main types
pub use backend::{Backend, BackendKind};
pub use join::preserve_rank_order;
pub use search::{TextSearchHits, TextSearchProvider};
pub use storage::{BookCatalog, BookStorage};
