//! Test infrastructure for the persistence layer.
//!
//! Provides a small seeded catalog and an in-memory full-text provider so
//! the search path can be exercised without a running search engine.

#![allow(dead_code)]

pub mod fixtures;
pub mod search;

pub use fixtures::*;
pub use search::*;
