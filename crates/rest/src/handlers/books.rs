//! Book listing and detail handlers.
//!
//! - `GET [base]/books` - filtered, searched, ordered and paginated listing
//! - `GET [base]/books/{id}` - a single book

use axum::{
    Json,
    extract::{Path, State},
};
use folio_persistence::core::BookCatalog;
use folio_persistence::types::BookRecord;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::BookListParams;
use crate::responses::{BookListResponse, books_endpoint};
use crate::state::AppState;

/// Handler for the book listing.
///
/// # HTTP Request
///
/// `GET [base]/books?search=&topic=&author=&title=&language=&mime_type=&gutenberg_id=&ordering=&page=&page_size=`
///
/// `topic`, `author`, `title`, `language` and `mime_type` are repeatable and
/// comma-separated. Values within one parameter are alternatives; different
/// parameters must all match.
///
/// # Response
///
/// - `200 OK` - `{count, next, previous, results}`
/// - `400 Bad Request` - malformed `page`, `page_size` or `gutenberg_id`
/// - `404 Not Found` - page past the end (`{"detail": "Invalid page."}`)
/// - `501 Not Implemented` - `search` given but no search index configured
/// - `503 Service Unavailable` - the search index is unreachable
///
/// # Example
///
/// ```http
/// GET /books?topic=pirates,sea&language=en&page=2 HTTP/1.1
/// Host: localhost:8000
/// ```
pub async fn list_books_handler<C>(
    State(state): State<AppState<C>>,
    params: BookListParams,
) -> RestResult<Json<BookListResponse>>
where
    C: BookCatalog + Send + Sync + 'static,
{
    let query = params.query();
    debug!(
        search = ?query.search_term(),
        page = query.page.page,
        page_size = query.page.page_size,
        "Processing book list request"
    );

    let page = state.catalog().list_books(query).await?;

    debug!(count = page.total(), returned = page.len(), "Book list complete");

    let endpoint = books_endpoint(state.base_url());
    Ok(Json(BookListResponse::from_page(
        page,
        &endpoint,
        params.pairs(),
    )))
}

/// Handler for a single book.
///
/// # HTTP Request
///
/// `GET [base]/books/{id}`
///
/// # Response
///
/// - `200 OK` - the book with all related collections
/// - `404 Not Found` - no such book, or the id is not an integer
pub async fn get_book_handler<C>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> RestResult<Json<BookRecord>>
where
    C: BookCatalog + Send + Sync,
{
    debug!(id = %id, "Processing book read request");

    let id: i64 = id.parse().map_err(|_| RestError::NotFound {
        message: "Not found.".to_string(),
    })?;

    let book = state.catalog().get_book(id).await?;
    Ok(Json(book))
}
