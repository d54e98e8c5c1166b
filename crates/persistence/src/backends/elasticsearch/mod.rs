//! Elasticsearch full-text search backend.
//!
//! Ranks books for free-text queries. The index holds one flattened
//! document per book; matches are resolved back to full records by the
//! relational store.
//!
//! # Queries
//!
//! - `multi_match` over title (boosted), authors, subjects, bookshelves,
//!   languages and formats, with fuzziness 1
//! - filters applied in a `bool.filter` clause
//! - counts via a `cardinality` aggregation on `id`
//! - windows via `from`/`size` with `collapse` on `id`

mod backend;
mod document;
mod query_builder;
mod schema;
mod search_impl;

pub use backend::{ElasticsearchAuth, ElasticsearchBackend, ElasticsearchConfig};
pub use query_builder::{EsQueryBuilder, predicate_clause};
pub use schema::create_index_mapping;
