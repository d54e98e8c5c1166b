//! Common test utilities for REST API testing.
//!
//! - [`harness`] - Test server construction
//! - [`fixtures`] - Seed catalog and an in-memory search provider
//! - [`assertions`] - HTTP response assertions

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod harness;
