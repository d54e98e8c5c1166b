//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! following a hierarchy that separates resource errors, validation errors,
//! search errors and backend errors.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
///
/// This enum encompasses all possible errors that can occur during catalog
/// queries, organized by category.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Resource state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Search operation errors
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to resource state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested book was not found.
    #[error("book not found: {id}")]
    NotFound { id: i64 },
}

/// Errors related to request validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A query parameter could not be interpreted.
    #[error("invalid parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// A record failed validation before being written.
    #[error("invalid record: {message}")]
    InvalidRecord { message: String },
}

/// Errors related to search and paging.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The requested page lies past the last page of results.
    #[error("invalid page {page}: only {total} matching books")]
    PageOutOfRange { page: u32, total: u64 },

    /// The requested page lies deeper than the search engine pages.
    #[error("search results past the first {max_window} hits cannot be paged")]
    WindowTooDeep { max_window: u64 },

    /// Text search was requested but no search backend is configured.
    #[error("full-text search not available")]
    TextSearchNotAvailable,

    /// The search engine returned a response that could not be interpreted.
    #[error("malformed search response: {message}")]
    MalformedResponse { message: String },
}

/// Errors originating from the database or search backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution error.
    #[error("query execution failed in {backend_name}: {message}")]
    QueryError {
        backend_name: String,
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

impl BackendError {
    /// Returns true when the failure means the backend could not be reached.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            BackendError::Unavailable { .. } | BackendError::ConnectionFailed { .. }
        )
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Backend(BackendError::SerializationError {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::Resource(ResourceError::NotFound { id: 42 });
        assert_eq!(err.to_string(), "book not found: 42");

        let err = StorageError::Search(SearchError::PageOutOfRange { page: 9, total: 3 });
        assert!(err.to_string().contains("invalid page 9"));
    }

    #[test]
    fn test_backend_unavailable() {
        let err = BackendError::Unavailable {
            backend_name: "elasticsearch".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(err.is_unavailable());

        let err = BackendError::QueryError {
            backend_name: "sqlite".to_string(),
            message: "no such table".to_string(),
        };
        assert!(!err.is_unavailable());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StorageError = json_err.into();
        assert!(matches!(
            err,
            StorageError::Backend(BackendError::SerializationError { .. })
        ));
    }
}
