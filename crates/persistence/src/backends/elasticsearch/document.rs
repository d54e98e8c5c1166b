//! Keeping book documents in the index.

use elasticsearch::IndexParts;
use serde_json::json;

use crate::error::StorageResult;
use crate::types::{BookRecord, SearchDocument};

use super::backend::{ElasticsearchBackend, internal_error, unavailable};

impl ElasticsearchBackend {
    /// Indexes (or replaces) the search document for a book.
    ///
    /// The document id is the book id.
    pub async fn index_document(&self, book: &BookRecord) -> StorageResult<()> {
        let index = self.index_name();
        let doc_id = book.id.to_string();
        let doc = SearchDocument::from(book);

        let response = self
            .client()
            .index(IndexParts::IndexId(index, &doc_id))
            .body(json!(doc))
            .send()
            .await
            .map_err(|e| unavailable(format!("Index request failed: {}", e)))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(internal_error(format!(
                "Failed to index book {} (status {}): {}",
                book.id, status, body
            )));
        }

        tracing::debug!(book_id = book.id, "Indexed search document");
        Ok(())
    }
}
