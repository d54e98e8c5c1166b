//! Application state for the catalog REST API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the catalog and the server configuration.

use std::sync::Arc;

use folio_persistence::core::BookCatalog;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `C` - The catalog type (must implement [`BookCatalog`])
///
/// # Example
///
/// ```rust,ignore
/// use folio_rest::{AppState, ServerConfig};
/// use folio_persistence::composite::CompositeCatalog;
/// use folio_persistence::backends::sqlite::SqliteBackend;
/// use std::sync::Arc;
///
/// let backend = SqliteBackend::in_memory()?;
/// let catalog = CompositeCatalog::new(Arc::new(backend));
/// let state = AppState::new(Arc::new(catalog), ServerConfig::default());
/// ```
pub struct AppState<C> {
    /// The catalog.
    catalog: Arc<C>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since C is wrapped in Arc and doesn't need to be Clone
impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            config: Arc::clone(&self.config),
        }
    }
}

impl<C: BookCatalog> AppState<C> {
    /// Creates a new AppState with the given catalog and configuration.
    pub fn new(catalog: Arc<C>, config: ServerConfig) -> Self {
        Self {
            catalog,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the base URL for the server.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the page size used when a request names none.
    pub fn default_page_size(&self) -> u32 {
        self.config.default_page_size
    }

    /// Returns the largest page size served.
    pub fn max_page_size(&self) -> u32 {
        self.config.max_page_size
    }
}
