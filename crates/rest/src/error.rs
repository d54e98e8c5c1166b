//! Error types for the catalog REST API.
//!
//! This module defines all error types used by the REST layer, with
//! automatic conversion to JSON error responses of the form
//! `{"detail": "<message>"}`.
//!
//! # Error Mapping
//!
//! Storage errors from the persistence layer are mapped to HTTP status codes:
//!
//! | Storage Error | HTTP Status |
//! |--------------|-------------|
//! | NotFound | 404 |
//! | PageOutOfRange | 404 ("Invalid page.") |
//! | ValidationError | 400 |
//! | TextSearchNotAvailable | 501 |
//! | Unavailable / ConnectionFailed | 503 |
//! | Other backend errors | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_persistence::error::{
    BackendError, ResourceError, SearchError, StorageError, ValidationError,
};
use std::fmt;

/// Message returned for a page past the end of the results.
pub const INVALID_PAGE: &str = "Invalid page.";

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Resource not found (HTTP 404).
    NotFound {
        /// Error message.
        message: String,
    },

    /// Bad request - malformed parameter (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Not implemented (HTTP 501).
    NotImplemented {
        /// Description of what's not implemented.
        feature: String,
    },

    /// A backend is unreachable (HTTP 503).
    ServiceUnavailable {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::NotImplemented { .. } => StatusCode::NOT_IMPLEMENTED,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the client-facing detail message.
    pub fn detail(&self) -> &str {
        match self {
            RestError::NotFound { message }
            | RestError::BadRequest { message }
            | RestError::ServiceUnavailable { message }
            | RestError::InternalError { message } => message,
            RestError::NotImplemented { feature } => feature,
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { message } => write!(f, "Not found: {}", message),
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::NotImplemented { feature } => write!(f, "Not implemented: {}", feature),
            RestError::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {}", message)
            }
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "Request failed");
        }
        (status, Json(create_error_body(self.detail()))).into_response()
    }
}

/// Creates a JSON error body.
fn create_error_body(detail: &str) -> serde_json::Value {
    serde_json::json!({ "detail": detail })
}

// Implement conversions from storage errors
impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(e) => e.into(),
            StorageError::Validation(e) => e.into(),
            StorageError::Search(e) => e.into(),
            StorageError::Backend(e) => e.into(),
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { .. } => RestError::NotFound {
                message: "Not found.".to_string(),
            },
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidParameter { parameter, message } => RestError::BadRequest {
                message: format!("Invalid parameter '{}': {}", parameter, message),
            },
            ValidationError::InvalidRecord { message } => RestError::BadRequest { message },
        }
    }
}

impl From<SearchError> for RestError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::PageOutOfRange { .. } => RestError::NotFound {
                message: INVALID_PAGE.to_string(),
            },
            SearchError::WindowTooDeep { max_window } => RestError::BadRequest {
                message: format!(
                    "Search results past the first {} cannot be paged. Narrow the search.",
                    max_window
                ),
            },
            SearchError::TextSearchNotAvailable => RestError::NotImplemented {
                feature: "Full-text search is not configured.".to_string(),
            },
            SearchError::MalformedResponse { .. } => RestError::InternalError {
                message: err.to_string(),
            },
        }
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        if err.is_unavailable() {
            return RestError::ServiceUnavailable {
                message: err.to_string(),
            };
        }
        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_search_window_is_bad_request() {
        let err: RestError = StorageError::Search(SearchError::WindowTooDeep {
            max_window: 10_000,
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.detail().contains("10000"));
    }

    #[test]
    fn test_page_out_of_range_is_invalid_page() {
        let err: RestError = StorageError::Search(SearchError::PageOutOfRange {
            page: 9,
            total: 3,
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.detail(), "Invalid page.");
    }

    #[test]
    fn test_text_search_not_available() {
        let err: RestError = StorageError::Search(SearchError::TextSearchNotAvailable).into();
        assert_eq!(err.status_code(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn test_unavailable_backend() {
        let err: RestError = StorageError::Backend(BackendError::Unavailable {
            backend_name: "elasticsearch".to_string(),
            message: "connection refused".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_query_error_is_internal() {
        let err: RestError = StorageError::Backend(BackendError::QueryError {
            backend_name: "sqlite".to_string(),
            message: "no such table".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_bad_request_display() {
        let err = RestError::BadRequest {
            message: "page must be a positive integer".to_string(),
        };
        assert!(err.to_string().starts_with("Bad request"));
    }

    #[test]
    fn test_error_body() {
        let body = create_error_body("Invalid page.");
        assert_eq!(body, serde_json::json!({ "detail": "Invalid page." }));
    }
}
