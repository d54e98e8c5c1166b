//! Core types for the catalog.
//!
//! This module contains the data model served to clients, the filter and
//! predicate types that describe a request, and the ordering and pagination
//! types that shape the response.

mod book;
mod filter;
mod ordering;
mod pagination;

pub use book::{Author, BookRecord, Bookshelf, Format, Language, SearchDocument, Subject};
pub use filter::{BookFilter, BookQuery, Condition, Predicate};
pub use ordering::{SortDirection, SortDirective, SortField};
pub use pagination::{
    BookPage, CountAuthority, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, PageWindow,
};
