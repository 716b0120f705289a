//! The search-provider seam.
//!
//! The vector index, lexical scoring, and semantic reranking all live in a
//! hosted service. Everything that talks to it goes through this trait so
//! the rest of the crate (and tests) never touch the wire directly.

use crate::query::SearchQuery;
use crate::results::SearchResults;
use crate::schema::IndexSchema;
use searchlight_core::AppResult;
use serde_json::{Map, Value};

/// Per-document outcome of a batch upload.
#[derive(Debug, Clone)]
pub struct UploadResult {
    pub key: String,
    pub succeeded: bool,
    pub status_code: Option<u16>,
    pub message: Option<String>,
}

/// Outcome of one batch upload, as reported by the service.
///
/// A batch with any failed item is surfaced whole; there is no per-item
/// retry or splitting.
#[derive(Debug, Clone, Default)]
pub struct UploadSummary {
    pub results: Vec<UploadResult>,
}

impl UploadSummary {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.succeeded).count()
    }

    /// Messages of the failed items, keyed for diagnostics.
    pub fn failure_messages(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| !r.succeeded)
            .map(|r| {
                format!(
                    "{}: {}",
                    r.key,
                    r.message.as_deref().unwrap_or("unknown error")
                )
            })
            .collect()
    }
}

/// Trait for hosted search providers.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Get the provider name (e.g., "azure").
    fn provider_name(&self) -> &str;

    /// Create or update the index definition (idempotent by name).
    async fn ensure_index(&self, schema: &IndexSchema) -> AppResult<()>;

    /// Upload documents in a single batch call.
    async fn upload_documents(
        &self,
        index: &str,
        documents: Vec<Map<String, Value>>,
    ) -> AppResult<UploadSummary>;

    /// Execute a query, following continuation pages until the service
    /// signals completion, and return the normalized results.
    async fn search(&self, index: &str, query: &SearchQuery) -> AppResult<SearchResults>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_summary_counts() {
        let summary = UploadSummary {
            results: vec![
                UploadResult {
                    key: "1".to_string(),
                    succeeded: true,
                    status_code: Some(201),
                    message: None,
                },
                UploadResult {
                    key: "2".to_string(),
                    succeeded: false,
                    status_code: Some(400),
                    message: Some("vector dimension mismatch".to_string()),
                },
            ],
        };

        assert_eq!(summary.succeeded(), 1);
        assert_eq!(summary.failed(), 1);
        let messages = summary.failure_messages();
        assert_eq!(messages, vec!["2: vector dimension mismatch".to_string()]);
    }
}
