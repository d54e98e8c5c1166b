//! # folio-rest - Book Catalog REST API
//!
//! This crate provides the HTTP surface of the Folio book catalog: a
//! filterable, searchable and paginated listing of books together with
//! their authors, subjects, bookshelves, languages and download formats.
//!
//! ## Features
//!
//! - **Filtering**: repeatable, comma-separated `topic`, `author`, `title`,
//!   `language` and `mime_type` parameters plus exact `gutenberg_id`
//! - **Search**: free-text search ranked by a full-text index (`elasticsearch`)
//! - **Ordering**: `ordering=download_count|title`, `-` for descending
//! - **Pagination**: `page`/`page_size` with absolute `next`/`previous` links
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use folio_rest::{create_app_with_config, ServerConfig};
//! use folio_persistence::backends::sqlite::SqliteBackend;
//! use folio_persistence::composite::CompositeCatalog;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("folio.db")?;
//!     backend.init_schema()?;
//!
//!     let catalog = CompositeCatalog::new(Arc::new(backend));
//!     let app = create_app_with_config(catalog, ServerConfig::default());
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL Pattern |
//! |------------|-------------|-------------|
//! | list | GET | `/books?params` |
//! | read | GET | `/books/{id}` |
//! | health | GET | `/health` |
//! | liveness | GET | `/_liveness` |
//! | readiness | GET | `/_readiness` |
//!
//! ## Error Handling
//!
//! Errors are returned as `{"detail": "<message>"}` with the status codes
//! listed in [`error`].
//!
//! ## Architecture
//!
//! - [`error`] - Error types and status mapping
//! - [`config`] - Server configuration
//! - [`state`] - Application state (catalog, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Axum extractors for listing parameters
//! - [`responses`] - The paginated envelope
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::{ServerConfig, StorageBackendMode};
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use folio_persistence::core::BookCatalog;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<C>(catalog: C) -> Router
where
    C: BookCatalog + Send + Sync + 'static,
{
    create_app_with_config(catalog, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Arguments
///
/// * `catalog` - The catalog answering requests
/// * `config` - Server configuration
///
/// # Example
///
/// ```rust,ignore
/// use folio_rest::{create_app_with_config, ServerConfig};
///
/// let config = ServerConfig {
///     port: 3000,
///     enable_cors: true,
///     ..Default::default()
/// };
/// let app = create_app_with_config(catalog, config);
/// ```
pub fn create_app_with_config<C>(catalog: C, config: ServerConfig) -> Router
where
    C: BookCatalog + Send + Sync + 'static,
{
    info!(
        base_url = %config.base_url,
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        "Creating catalog REST API"
    );

    let state = AppState::new(Arc::new(catalog), config.clone());

    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "folio_rest={level},folio_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
