//! Axum extractors for catalog requests.
//!
//! - [`BookListParams`] - Extract filters, search, ordering and paging for `GET /books`
//! - [`list_param`] - Collect repeatable, comma-separated parameter values

mod book_query;
mod list_params;

pub use book_query::BookListParams;
pub use list_params::{list_param, query_pairs, single_param};
