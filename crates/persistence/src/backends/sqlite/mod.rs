//! SQLite backend implementation.
//!
//! This module provides the relational side of the catalog. It supports
//! both in-memory databases (great for testing) and file-based databases.
//!
//! # Features
//!
//! - In-memory and file-based modes
//! - Predicate rendering to correlated `EXISTS` subqueries
//! - Stable ordering with an `id` tie-breaker
//! - Batched eager loading of all related collections
//!
//! # Example
//!
//! ```no_run
//! use folio_persistence::backends::sqlite::SqliteBackend;
//! use folio_persistence::types::{Author, BookRecord};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! backend.insert_book(
//!     &BookRecord::new(1, 84, "Frankenstein")
//!         .with_author(Author::new(1, "Shelley, Mary Wollstonecraft"))
//!         .with_language(1, "en"),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE books_book (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     title VARCHAR(1024) NOT NULL,
//!     gutenberg_id INTEGER NOT NULL UNIQUE,
//!     media_type VARCHAR(16) NOT NULL,
//!     download_count INTEGER NOT NULL DEFAULT 0
//! );
//!
//! -- One join table per relation, each UNIQUE (book_id, <related>_id)
//! CREATE TABLE books_book_authors (book_id, author_id);
//! CREATE TABLE books_book_subjects (book_id, subject_id);
//! CREATE TABLE books_book_bookshelves (book_id, bookshelf_id);
//! CREATE TABLE books_book_languages (book_id, language_id);
//!
//! -- Formats belong to a single book
//! CREATE TABLE books_format (book_id, mime_type, url);
//! ```

mod backend;
mod query_builder;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use query_builder::{QueryBuilder, SqlFragment, SqlParam};
