//! Paginated listing envelope.
//!
//! Wraps a [`BookPage`] as `{count, next, previous, results}` with absolute
//! navigation links that keep every other query parameter.

use folio_persistence::types::{BookPage, BookRecord};
use serde::Serialize;
use url::form_urlencoded;

/// The JSON body of `GET /books`.
#[derive(Debug, Clone, Serialize)]
pub struct BookListResponse {
    /// Distinct number of matching books.
    pub count: u64,

    /// Link to the following page, if any.
    pub next: Option<String>,

    /// Link to the preceding page, if any.
    pub previous: Option<String>,

    /// The books on this page.
    pub results: Vec<BookRecord>,
}

impl BookListResponse {
    /// Builds the envelope for a page.
    ///
    /// `endpoint` is the absolute URL of the listing; `pairs` are the
    /// request's decoded query parameters in order.
    pub fn from_page(page: BookPage, endpoint: &str, pairs: &[(String, String)]) -> Self {
        let current = page.page.page;

        let next = page
            .has_next()
            .then(|| page_link(endpoint, pairs, Some(current + 1)));

        // The link back to the first page carries no page parameter
        let previous = page.has_previous().then(|| {
            let target = current - 1;
            page_link(endpoint, pairs, (target > 1).then_some(target))
        });

        Self {
            count: page.total(),
            next,
            previous,
            results: page.items,
        }
    }
}

/// Returns the absolute URL of the book listing.
pub fn books_endpoint(base_url: &str) -> String {
    format!("{}/books", base_url.trim_end_matches('/'))
}

/// Builds a link to `page`, replacing any `page` parameter in place or
/// appending it. `None` removes the parameter.
fn page_link(endpoint: &str, pairs: &[(String, String)], page: Option<u32>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut placed = false;

    for (key, value) in pairs {
        if key == "page" {
            if let (Some(p), false) = (page, placed) {
                serializer.append_pair("page", &p.to_string());
                placed = true;
            }
            continue;
        }
        serializer.append_pair(key, value);
    }
    if let (Some(p), false) = (page, placed) {
        serializer.append_pair("page", &p.to_string());
    }

    let query = serializer.finish();
    if query.is_empty() {
        endpoint.to_string()
    } else {
        format!("{}?{}", endpoint, query)
    }
}
