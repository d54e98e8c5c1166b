//! Response formatting.
//!
//! - [`page`] - Paginated listing envelope with navigation links

pub mod page;

pub use page::{BookListResponse, books_endpoint};
