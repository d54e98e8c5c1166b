//! Folio book catalog server.
//!
//! Serves the `/books` API over a SQLite catalog, optionally backed by
//! Elasticsearch for full-text search.

use clap::Parser;
use folio_rest::{ServerConfig, StorageBackendMode, create_app_with_config, init_logging};
use tracing::info;

#[cfg(feature = "sqlite")]
use folio_persistence::backends::sqlite::{SqliteBackend, SqliteBackendConfig};

/// Creates and initializes a SQLite backend from the server configuration.
#[cfg(feature = "sqlite")]
fn create_sqlite_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    let db_path = config.database_path();
    info!(database = %db_path, "Initializing SQLite backend");

    let backend = if db_path == ":memory:" {
        SqliteBackend::in_memory()?
    } else {
        SqliteBackend::with_config(db_path, SqliteBackendConfig::default())?
    };
    backend.init_schema()?;

    Ok(backend)
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let backend_mode = config
        .storage_backend_mode()
        .map_err(|e| anyhow::anyhow!("Invalid storage backend configuration: {}", e))?;

    info!(
        port = config.port,
        host = %config.host,
        storage_backend = %backend_mode,
        "Starting Folio"
    );

    match backend_mode {
        StorageBackendMode::Sqlite => start_sqlite(config).await,
        StorageBackendMode::SqliteElasticsearch => start_sqlite_elasticsearch(config).await,
    }
}

/// Starts the server over SQLite alone. Search requests answer 501.
#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig) -> anyhow::Result<()> {
    use std::sync::Arc;

    use folio_persistence::composite::CompositeCatalog;

    let backend = create_sqlite_backend(&config)?;
    let catalog = CompositeCatalog::new(Arc::new(backend));

    let app = create_app_with_config(catalog, config.clone());
    serve(app, &config).await
}

/// Fallback when sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn start_sqlite(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p folio-server --features sqlite"
    )
}

/// Starts the server with SQLite for records and Elasticsearch for search.
#[cfg(all(feature = "sqlite", feature = "elasticsearch"))]
async fn start_sqlite_elasticsearch(config: ServerConfig) -> anyhow::Result<()> {
    use std::sync::Arc;

    use folio_persistence::backends::elasticsearch::{
        ElasticsearchAuth, ElasticsearchBackend, ElasticsearchConfig,
    };
    use folio_persistence::composite::CompositeCatalog;
    use folio_persistence::core::Backend;
    use tracing::warn;

    let sqlite = create_sqlite_backend(&config)?;

    let es_nodes = config.elasticsearch_node_list();
    let es_auth = match (
        &config.elasticsearch_token,
        &config.elasticsearch_username,
        &config.elasticsearch_password,
    ) {
        (Some(token), _, _) => Some(ElasticsearchAuth::Bearer {
            token: token.clone(),
        }),
        (None, Some(username), Some(password)) => Some(ElasticsearchAuth::Basic {
            username: username.clone(),
            password: password.clone(),
        }),
        _ => None,
    };

    let es_config = ElasticsearchConfig {
        nodes: es_nodes.clone(),
        index: config.elasticsearch_index.clone(),
        auth: es_auth,
        ..Default::default()
    };

    info!(
        nodes = ?es_nodes,
        index = %config.elasticsearch_index,
        "Initializing Elasticsearch backend"
    );

    let es = ElasticsearchBackend::new(es_config)?;

    // The engine may come up after us; search requests answer 503 until it does.
    if let Err(e) = es.initialize().await {
        warn!(error = %e, "Elasticsearch index not ready");
    }

    let catalog = CompositeCatalog::new(Arc::new(sqlite)).with_search(Arc::new(es));
    info!("Catalog initialized: SQLite (records) + Elasticsearch (search)");

    let app = create_app_with_config(catalog, config.clone());
    serve(app, &config).await
}

/// Fallback when elasticsearch feature is not enabled.
#[cfg(not(all(feature = "sqlite", feature = "elasticsearch")))]
async fn start_sqlite_elasticsearch(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite-elasticsearch backend requires the 'elasticsearch' feature. \
         Build with: cargo build -p folio-server --features sqlite,elasticsearch"
    )
}
