//! Catalog route configuration.

use axum::{Router, routing::get};
use folio_persistence::core::BookCatalog;

use crate::handlers;
use crate::state::AppState;

/// Creates all catalog REST API routes.
///
/// # Routes
///
/// - `GET /books` - Listing
/// - `GET /books/{id}` - Detail
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
pub fn create_routes<C>(state: AppState<C>) -> Router
where
    C: BookCatalog + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<C>))
        .route("/books", get(handlers::list_books_handler::<C>))
        .route("/books/{id}", get(handlers::get_book_handler::<C>))
        .with_state(state)
}
