//! TextSearchProvider implementation for Elasticsearch.

use async_trait::async_trait;
use elasticsearch::SearchParts;
use serde_json::Value;

use crate::core::{Backend, TextSearchProvider};
use crate::error::{BackendError, SearchError, StorageError, StorageResult};
use crate::types::{PageWindow, Predicate};

use super::backend::{ElasticsearchBackend, internal_error, unavailable};
use super::query_builder::{DISTINCT_AGG, EsQueryBuilder};

fn malformed(message: impl Into<String>) -> StorageError {
    StorageError::Search(SearchError::MalformedResponse {
        message: message.into(),
    })
}

impl ElasticsearchBackend {
    /// Sends a search body to the book index and returns the parsed response.
    async fn execute_search(&self, body: Value) -> StorageResult<Value> {
        let index = self.index_name();
        let response = self
            .client()
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await
            .map_err(|e| unavailable(format!("Search request failed: {}", e)))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if body.contains("index_not_found_exception") {
                return Err(unavailable(format!("Index '{}' does not exist", index)));
            }
            return Err(internal_error(format!(
                "Search failed (status {}): {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| malformed(format!("Failed to parse response: {}", e)))
    }
}

/// Reads the distinct total from a count response.
pub(crate) fn parse_distinct_total(body: &Value) -> StorageResult<u64> {
    body.get("aggregations")
        .and_then(|a| a.get(DISTINCT_AGG))
        .and_then(|d| d.get("value"))
        .and_then(Value::as_u64)
        .ok_or_else(|| malformed(format!("missing aggregations.{}.value", DISTINCT_AGG)))
}

/// Reads book ids from the hits of a window response, in hit order.
///
/// The id comes from `_id`, falling back to `_source.id`.
pub(crate) fn parse_hit_ids(body: &Value) -> StorageResult<Vec<i64>> {
    let hits = body
        .get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("missing hits.hits"))?;

    hits.iter().map(hit_id).collect()
}

fn hit_id(hit: &Value) -> StorageResult<i64> {
    if let Some(id) = hit
        .get("_id")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<i64>().ok())
    {
        return Ok(id);
    }

    let source_id = hit.get("_source").and_then(|s| s.get("id"));
    source_id
        .and_then(Value::as_i64)
        .or_else(|| {
            source_id
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok())
        })
        .ok_or_else(|| malformed(format!("hit without a book id: {}", hit)))
}

#[async_trait]
impl TextSearchProvider for ElasticsearchBackend {
    fn provider_name(&self) -> &'static str {
        "elasticsearch"
    }

    fn max_window(&self) -> Option<u64> {
        Some(u64::from(self.config().max_result_window))
    }

    async fn count_matches(&self, term: &str, predicate: &Predicate) -> StorageResult<u64> {
        let body = EsQueryBuilder::new(term, predicate).build_count();
        let response = self.execute_search(body).await?;
        parse_distinct_total(&response)
    }

    async fn ranked_ids(
        &self,
        term: &str,
        predicate: &Predicate,
        window: PageWindow,
    ) -> StorageResult<Vec<i64>> {
        window.ensure_within(u64::from(self.config().max_result_window))?;
        let body = EsQueryBuilder::new(term, predicate).build_window(window);
        let response = self.execute_search(body).await?;
        let ids = parse_hit_ids(&response)?;
        tracing::debug!(
            term,
            offset = window.offset,
            hits = ids.len(),
            "Elasticsearch window query"
        );
        Ok(ids)
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        Backend::health_check(self).await
    }
}
