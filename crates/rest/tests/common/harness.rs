//! REST API test harness.

use std::sync::Arc;

use axum_test::TestServer;
use folio_persistence::backends::sqlite::SqliteBackend;
use folio_persistence::composite::{CompositeCatalog, DynSearchProvider};
use folio_rest::{ServerConfig, create_app_with_config};

use super::fixtures::books;

/// Base URL used in pagination links during tests.
pub const BASE_URL: &str = "http://testserver";

/// Creates an in-memory backend seeded with the fixture books.
pub fn seeded_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    for book in books() {
        backend.insert_book(&book).expect("Failed to seed book");
    }
    backend
}

/// Returns the test configuration.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        base_url: BASE_URL.to_string(),
        ..ServerConfig::for_testing()
    }
}

/// Creates a test server over the seeded catalog, without search.
pub fn relational_server() -> TestServer {
    server_with(CompositeCatalog::new(Arc::new(seeded_backend())), test_config())
}

/// Creates a test server over the seeded catalog with a search provider.
pub fn search_server(search: DynSearchProvider) -> TestServer {
    let catalog = CompositeCatalog::new(Arc::new(seeded_backend())).with_search(search);
    server_with(catalog, test_config())
}

/// Creates a test server for a catalog and configuration.
pub fn server_with(catalog: CompositeCatalog, config: ServerConfig) -> TestServer {
    let app = create_app_with_config(catalog, config);
    TestServer::new(app).expect("Failed to create test server")
}
