//! Backend abstraction for the catalog's stores.
//!
//! Each store the catalog talks to (the relational database and the
//! full-text index) implements [`Backend`] so it can be initialized at
//! startup and probed by readiness checks.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::BackendError;

/// Identifies the type of backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// SQLite database (file-based or in-memory).
    Sqlite,
    /// Elasticsearch (search engine).
    Elasticsearch,
    /// Custom or unknown backend.
    Custom(&'static str),
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Sqlite => write!(f, "sqlite"),
            BackendKind::Elasticsearch => write!(f, "elasticsearch"),
            BackendKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// A store that can be initialized and health checked.
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    /// Returns the kind of backend.
    fn kind(&self) -> BackendKind;

    /// Returns a human-readable name for this backend.
    fn name(&self) -> &'static str;

    /// Checks if the backend is reachable and answering queries.
    async fn health_check(&self) -> Result<(), BackendError>;

    /// Creates the schema or index if it does not exist yet.
    async fn initialize(&self) -> Result<(), BackendError>;
}
