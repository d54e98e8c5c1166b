//! Server configuration for the catalog REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FOLIO_SERVER_PORT` | 8000 | Server port |
//! | `FOLIO_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `FOLIO_LOG_LEVEL` | info | Log level |
//! | `FOLIO_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `FOLIO_ENABLE_CORS` | true | Enable CORS |
//! | `FOLIO_CORS_ORIGINS` | * | Allowed origins |
//! | `FOLIO_CORS_METHODS` | GET,OPTIONS | Allowed methods |
//! | `FOLIO_CORS_HEADERS` | * | Allowed headers |
//! | `FOLIO_BASE_URL` | http://localhost:8000 | Base URL for pagination links |
//! | `FOLIO_DATABASE_URL` | folio.db | SQLite database path |
//! | `FOLIO_DEFAULT_PAGE_SIZE` | 25 | Page size when none is requested |
//! | `FOLIO_MAX_PAGE_SIZE` | 100 | Largest page size served |
//! | `FOLIO_STORAGE_BACKEND` | sqlite | `sqlite` or `sqlite-elasticsearch` |
//! | `FOLIO_ELASTICSEARCH_NODES` | http://localhost:9200 | Comma-separated node URLs |
//! | `FOLIO_ELASTICSEARCH_INDEX` | books | Book index name |
//! | `FOLIO_ELASTICSEARCH_USERNAME` | - | Basic auth user |
//! | `FOLIO_ELASTICSEARCH_PASSWORD` | - | Basic auth password |
//!
//! # Example
//!
//! ```rust
//! use folio_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     enable_cors: true,
//!     ..Default::default()
//! };
//! ```

use std::fmt;
use std::str::FromStr;

use clap::Parser;

/// Which stores back the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendMode {
    /// SQLite only; free-text search is unavailable.
    Sqlite,
    /// SQLite for records, Elasticsearch for free-text search.
    SqliteElasticsearch,
}

impl fmt::Display for StorageBackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackendMode::Sqlite => write!(f, "sqlite"),
            StorageBackendMode::SqliteElasticsearch => write!(f, "sqlite-elasticsearch"),
        }
    }
}

impl FromStr for StorageBackendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StorageBackendMode::Sqlite),
            "sqlite-elasticsearch" | "sqlite_elasticsearch" => {
                Ok(StorageBackendMode::SqliteElasticsearch)
            }
            other => Err(format!(
                "unknown storage backend '{}' (expected 'sqlite' or 'sqlite-elasticsearch')",
                other
            )),
        }
    }
}

/// Server configuration for the catalog REST API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "folio")]
#[command(about = "Book catalog search API")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "FOLIO_SERVER_PORT", default_value = "8000")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "FOLIO_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "FOLIO_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "FOLIO_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "FOLIO_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "FOLIO_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "FOLIO_CORS_METHODS", default_value = "GET,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "FOLIO_CORS_HEADERS", default_value = "*")]
    pub cors_headers: String,

    /// Base URL for the server (used in pagination links).
    #[arg(long, env = "FOLIO_BASE_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// SQLite database path, or `:memory:`.
    #[arg(long, env = "FOLIO_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Default page size for listings.
    #[arg(long, env = "FOLIO_DEFAULT_PAGE_SIZE", default_value = "25")]
    pub default_page_size: u32,

    /// Maximum page size for listings; larger requests are clamped.
    #[arg(long, env = "FOLIO_MAX_PAGE_SIZE", default_value = "100")]
    pub max_page_size: u32,

    /// Storage backend (`sqlite` or `sqlite-elasticsearch`).
    #[arg(long, env = "FOLIO_STORAGE_BACKEND", default_value = "sqlite")]
    pub storage_backend: String,

    /// Elasticsearch node URLs (comma-separated).
    #[arg(
        long,
        env = "FOLIO_ELASTICSEARCH_NODES",
        default_value = "http://localhost:9200"
    )]
    pub elasticsearch_nodes: String,

    /// Elasticsearch index holding book documents.
    #[arg(long, env = "FOLIO_ELASTICSEARCH_INDEX", default_value = "books")]
    pub elasticsearch_index: String,

    /// Elasticsearch username for basic auth.
    #[arg(long, env = "FOLIO_ELASTICSEARCH_USERNAME")]
    pub elasticsearch_username: Option<String>,

    /// Elasticsearch password for basic auth.
    #[arg(long, env = "FOLIO_ELASTICSEARCH_PASSWORD")]
    pub elasticsearch_password: Option<String>,

    /// Elasticsearch bearer token. Exclusive with basic auth.
    #[arg(long, env = "FOLIO_ELASTICSEARCH_TOKEN")]
    pub elasticsearch_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,OPTIONS".to_string(),
            cors_headers: "*".to_string(),
            base_url: "http://localhost:8000".to_string(),
            database_url: None,
            default_page_size: 25,
            max_page_size: 100,
            storage_backend: "sqlite".to_string(),
            elasticsearch_nodes: "http://localhost:9200".to_string(),
            elasticsearch_index: "books".to_string(),
            elasticsearch_username: None,
            elasticsearch_password: None,
            elasticsearch_token: None,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the SQLite database path.
    pub fn database_path(&self) -> &str {
        self.database_url.as_deref().unwrap_or("folio.db")
    }

    /// Parses the configured storage backend.
    pub fn storage_backend_mode(&self) -> Result<StorageBackendMode, String> {
        self.storage_backend.parse()
    }

    /// Returns the configured Elasticsearch nodes.
    pub fn elasticsearch_node_list(&self) -> Vec<String> {
        self.elasticsearch_nodes
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            errors.push(format!("Base URL '{}' is not a valid URL", self.base_url));
        }

        match self.storage_backend_mode() {
            Ok(StorageBackendMode::SqliteElasticsearch) => {
                if self.elasticsearch_node_list().is_empty() {
                    errors.push("At least one Elasticsearch node is required".to_string());
                }
                if self.elasticsearch_index.trim().is_empty() {
                    errors.push("Elasticsearch index cannot be empty".to_string());
                }
                let basic = self.elasticsearch_username.is_some()
                    || self.elasticsearch_password.is_some();
                if basic && self.elasticsearch_token.is_some() {
                    errors.push(
                        "Elasticsearch token cannot be combined with username/password"
                            .to_string(),
                    );
                }
            }
            Ok(StorageBackendMode::Sqlite) => {}
            Err(e) => errors.push(e),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            base_url: "http://testserver".to_string(),
            database_url: Some(":memory:".to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.max_page_size, 100);
        assert_eq!(config.database_path(), "folio.db");
        assert!(config.enable_cors);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_invalid_page_sizes() {
        let config = ServerConfig {
            default_page_size: 100,
            max_page_size: 50,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let config = ServerConfig {
            port: 0,
            storage_backend: "postgres".to_string(),
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_storage_backend_mode() {
        let mut config = ServerConfig::default();
        assert_eq!(
            config.storage_backend_mode().unwrap(),
            StorageBackendMode::Sqlite
        );

        config.storage_backend = "sqlite-elasticsearch".to_string();
        let mode = config.storage_backend_mode().unwrap();
        assert_eq!(mode, StorageBackendMode::SqliteElasticsearch);
        assert_eq!(mode.to_string(), "sqlite-elasticsearch");
    }

    #[test]
    fn test_elasticsearch_node_list() {
        let config = ServerConfig {
            elasticsearch_nodes: "http://es1:9200, ,http://es2:9200".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.elasticsearch_node_list(),
            vec!["http://es1:9200".to_string(), "http://es2:9200".to_string()]
        );
    }

    #[test]
    fn test_validate_conflicting_elasticsearch_auth() {
        let config = ServerConfig {
            storage_backend: "sqlite-elasticsearch".to_string(),
            elasticsearch_username: Some("elastic".to_string()),
            elasticsearch_password: Some("changeme".to_string()),
            elasticsearch_token: Some("abc123".to_string()),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("token")));

        let config = ServerConfig {
            storage_backend: "sqlite-elasticsearch".to_string(),
            elasticsearch_token: Some("abc123".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
        assert_eq!(config.database_path(), ":memory:");
    }
}
