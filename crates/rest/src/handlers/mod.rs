//! HTTP request handlers.
//!
//! - [`books`] - Book listing and detail
//! - [`health`] - Health, liveness and readiness endpoints

pub mod books;
pub mod health;

// Re-export handlers for convenience
pub use books::{get_book_handler, list_books_handler};
pub use health::{health_handler, liveness_handler, readiness_handler};
