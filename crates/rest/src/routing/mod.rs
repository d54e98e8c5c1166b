//! Route configuration for the catalog REST API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod book_routes;

pub use book_routes::create_routes;
