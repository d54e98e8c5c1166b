//! Book listing request extractor.
//!
//! Turns the query string of `GET /books` into a [`BookQuery`].

use axum::{extract::FromRequestParts, http::request::Parts};
use folio_persistence::core::BookCatalog;
use folio_persistence::types::{BookFilter, BookQuery, PageRequest, SortDirective};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

use super::list_params::{list_param, query_pairs, single_param};

/// Axum extractor for book listing parameters.
///
/// Malformed `page`, `page_size` or `gutenberg_id` values are rejected with
/// 400; `page_size` above the configured maximum is clamped.
///
/// # Example
///
/// ```rust,ignore
/// use folio_rest::extractors::BookListParams;
///
/// async fn list_handler(params: BookListParams) {
///     let query = params.query();
///     let page = query.page.page;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BookListParams {
    query: BookQuery,
    pairs: Vec<(String, String)>,
}

impl BookListParams {
    /// Parses a raw query string.
    pub fn from_query_str(
        raw: &str,
        default_page_size: u32,
        max_page_size: u32,
    ) -> RestResult<Self> {
        let pairs = query_pairs(raw);

        let filter = BookFilter {
            topic: list_param(&pairs, "topic"),
            author: list_param(&pairs, "author"),
            title: list_param(&pairs, "title"),
            language: list_param(&pairs, "language"),
            mime_type: list_param(&pairs, "mime_type"),
            gutenberg_id: single_param(&pairs, "gutenberg_id")
                .map(parse_gutenberg_id)
                .transpose()?,
        };

        let page = match single_param(&pairs, "page") {
            Some(v) => parse_positive("page", v)?,
            None => 1,
        };
        let page_size = match single_param(&pairs, "page_size") {
            Some(v) => parse_positive("page_size", v)?,
            None => default_page_size,
        };

        let page = PageRequest::new(page, page_size).clamped(max_page_size);
        let mut query = BookQuery::new(filter).with_page(page);

        if let Some(ordering) = single_param(&pairs, "ordering") {
            let sort = SortDirective::parse(ordering);
            debug!(ordering, parsed = ?sort, "Parsed ordering");
            query = query.with_sort(sort);
        }

        if let Some(search) = single_param(&pairs, "search") {
            query = query.with_search(search);
        }

        Ok(Self { query, pairs })
    }

    /// Returns the parsed listing request.
    pub fn query(&self) -> &BookQuery {
        &self.query
    }

    /// Returns the decoded query string pairs, in request order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

fn parse_positive(name: &str, value: &str) -> RestResult<u32> {
    match value.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(RestError::BadRequest {
            message: format!("'{}' must be a positive integer, got '{}'.", name, value),
        }),
    }
}

fn parse_gutenberg_id(value: &str) -> RestResult<i64> {
    value.parse::<i64>().map_err(|_| RestError::BadRequest {
        message: format!("'gutenberg_id' must be an integer, got '{}'.", value),
    })
}

impl<C> FromRequestParts<AppState<C>> for BookListParams
where
    C: BookCatalog + Send + Sync + 'static,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<C>,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts.uri.query().unwrap_or("");
        Self::from_query_str(raw, state.default_page_size(), state.max_page_size())
    }
}
