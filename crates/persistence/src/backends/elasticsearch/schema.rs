//! Elasticsearch index schema and mapping definitions.
//!
//! Every searchable field is analyzed text for `multi_match`, with a
//! `keyword` subfield for exact filters and a `lowercase` subfield for
//! case-insensitive substring filters.

use elasticsearch::indices::{IndicesCreateParts, IndicesExistsParts};
use serde_json::{Value, json};

use crate::error::StorageResult;

use super::backend::{ElasticsearchBackend, ElasticsearchConfig, internal_error};

fn text_with_subfields() -> Value {
    json!({
        "type": "text",
        "analyzer": "standard",
        "fields": {
            "keyword": { "type": "keyword" },
            "lowercase": {
                "type": "keyword",
                "normalizer": "lowercase_normalizer"
            }
        }
    })
}

/// Creates the index body (settings and mappings) for book documents.
pub fn create_index_mapping(config: &ElasticsearchConfig) -> Value {
    json!({
        "settings": {
            "number_of_shards": config.number_of_shards,
            "number_of_replicas": config.number_of_replicas,
            "index.max_result_window": config.max_result_window,
            "refresh_interval": config.refresh_interval,
            "analysis": {
                "normalizer": {
                    "lowercase_normalizer": {
                        "type": "custom",
                        "filter": ["lowercase"]
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                // Collapse and cardinality both run on id
                "id": { "type": "long" },
                "gutenberg_id": { "type": "long" },
                "download_count": { "type": "long" },
                "media_type": { "type": "keyword" },

                "title": text_with_subfields(),
                "authors": text_with_subfields(),
                "subjects": text_with_subfields(),
                "bookshelves": text_with_subfields(),
                "languages": text_with_subfields(),
                "formats": text_with_subfields()
            }
        }
    })
}

/// Ensures the book index exists, creating it if necessary.
pub async fn ensure_index(backend: &ElasticsearchBackend) -> StorageResult<()> {
    let index = backend.index_name();

    let exists_response = backend
        .client()
        .indices()
        .exists(IndicesExistsParts::Index(&[index]))
        .send()
        .await
        .map_err(|e| internal_error(format!("Failed to check index existence: {}", e)))?;

    if exists_response.status_code().is_success() {
        return Ok(());
    }

    let mapping = create_index_mapping(backend.config());

    let response = backend
        .client()
        .indices()
        .create(IndicesCreateParts::Index(index))
        .body(mapping)
        .send()
        .await
        .map_err(|e| internal_error(format!("Failed to create index {}: {}", index, e)))?;

    let status = response.status_code();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        // Another process created it first
        if body.contains("resource_already_exists_exception") {
            return Ok(());
        }
        return Err(internal_error(format!(
            "Failed to create index {} (status {}): {}",
            index, status, body
        )));
    }

    tracing::info!("Created Elasticsearch index '{}'", index);
    Ok(())
}
