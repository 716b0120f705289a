//! Azure AI Search REST provider.
//!
//! Implements `SearchProvider` over the service's REST contract:
//! - `PUT /indexes/{name}` — create-or-update index definition,
//! - `POST /indexes/{name}/docs/index` — single batch document upload,
//! - `POST /indexes/{name}/docs/search` — query, re-POSTing the
//!   continuation body until the service stops returning one.
//!
//! Every non-success status becomes `AppError::Api` with the service's own
//! message. A response with zero matches parses into an empty result set
//! and is returned as `Ok`; the two cases never blur together.

use crate::provider::{SearchProvider, UploadResult, UploadSummary};
use crate::query::SearchQuery;
use crate::results::{SearchPage, SearchResults};
use crate::schema::IndexSchema;
use searchlight_core::{AppError, AppResult};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Batch response wire format.
#[derive(Debug, Deserialize)]
struct IndexBatchResponse {
    value: Vec<RawIndexingResult>,
}

/// Per-document entry in the batch response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIndexingResult {
    key: String,
    status: bool,
    #[serde(default)]
    status_code: Option<u16>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Error body wire format (`{"error": {"message": "..."}}`).
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// REST client for an Azure AI Search service.
pub struct AzureSearchClient {
    /// Service endpoint (e.g., "https://myservice.search.windows.net")
    endpoint: String,

    /// Admin/query API key, sent as the `api-key` header
    api_key: String,

    /// REST API version appended to every request
    api_version: String,

    /// HTTP client
    client: reqwest::Client,
}

impl AzureSearchClient {
    /// Create a new client.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_version: api_version.into(),
            client: reqwest::Client::new(),
        }
    }

    fn index_url(&self, index: &str) -> String {
        format!(
            "{}/indexes/{}?api-version={}",
            self.endpoint.trim_end_matches('/'),
            index,
            self.api_version
        )
    }

    fn docs_url(&self, index: &str, operation: &str) -> String {
        format!(
            "{}/indexes/{}/docs/{}?api-version={}",
            self.endpoint.trim_end_matches('/'),
            index,
            operation,
            self.api_version
        )
    }

    /// Wrap a batch of documents in the upload envelope, tagging each
    /// with the merge-or-upload action.
    fn batch_body(documents: Vec<Map<String, Value>>) -> Value {
        let value: Vec<Value> = documents
            .into_iter()
            .map(|mut doc| {
                doc.insert(
                    "@search.action".to_string(),
                    Value::String("mergeOrUpload".to_string()),
                );
                Value::Object(doc)
            })
            .collect();

        serde_json::json!({ "value": value })
    }

    /// Turn a non-success response into a typed service error.
    async fn api_error(response: reqwest::Response) -> AppError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        AppError::Api {
            status,
            message: parse_error_message(&body),
        }
    }

    /// POST one search request body and parse the page.
    async fn search_page(&self, index: &str, body: &Value) -> AppResult<SearchPage> {
        let response = self
            .client
            .post(self.docs_url(index, "search"))
            .header("api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Http(format!("Search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Failed to parse search response: {}", e)))
    }
}

/// Extract the service's message from an error body, falling back to the
/// raw text when it is not the usual JSON shape.
fn parse_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.to_string(),
    }
}

#[async_trait::async_trait]
impl SearchProvider for AzureSearchClient {
    fn provider_name(&self) -> &str {
        "azure"
    }

    async fn ensure_index(&self, schema: &IndexSchema) -> AppResult<()> {
        tracing::info!("Creating or updating index '{}'", schema.name);

        let response = self
            .client
            .put(self.index_url(&schema.name))
            .header("api-key", &self.api_key)
            .json(schema)
            .send()
            .await
            .map_err(|e| AppError::Http(format!("Index request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        tracing::info!("Index '{}' is ready", schema.name);
        Ok(())
    }

    async fn upload_documents(
        &self,
        index: &str,
        documents: Vec<Map<String, Value>>,
    ) -> AppResult<UploadSummary> {
        let count = documents.len();
        tracing::info!("Uploading {} documents to index '{}'", count, index);

        let body = Self::batch_body(documents);

        let response = self
            .client
            .post(self.docs_url(index, "index"))
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Http(format!("Upload request failed: {}", e)))?;

        // 207 means the batch was accepted but some items failed; the
        // per-item results below carry the detail.
        let status = response.status();
        if !status.is_success() && status.as_u16() != 207 {
            return Err(Self::api_error(response).await);
        }

        let batch: IndexBatchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Failed to parse upload response: {}", e)))?;

        let summary = UploadSummary {
            results: batch
                .value
                .into_iter()
                .map(|r| UploadResult {
                    key: r.key,
                    succeeded: r.status,
                    status_code: r.status_code,
                    message: r.error_message,
                })
                .collect(),
        };

        tracing::info!(
            "Upload finished: {} succeeded, {} failed",
            summary.succeeded(),
            summary.failed()
        );

        Ok(summary)
    }

    async fn search(&self, index: &str, query: &SearchQuery) -> AppResult<SearchResults> {
        let mut results = SearchResults::default();
        let mut body = serde_json::to_value(query)?;
        let mut pages = 0usize;

        loop {
            let mut page = self.search_page(index, &body).await?;
            pages += 1;

            let next = page.next_page_parameters.take();
            results.absorb_page(page)?;

            match next {
                Some(params) => {
                    tracing::debug!("Following continuation to page {}", pages + 1);
                    body = params;
                }
                None => break,
            }
        }

        tracing::debug!(
            "Search returned {} hits over {} page(s), total count {:?}",
            results.len(),
            pages,
            results.total_count
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AzureSearchClient {
        AzureSearchClient::new(
            "https://myservice.search.windows.net/",
            "admin-key",
            "2023-11-01",
        )
    }

    #[test]
    fn test_index_url() {
        assert_eq!(
            client().index_url("catalog-index"),
            "https://myservice.search.windows.net/indexes/catalog-index?api-version=2023-11-01"
        );
    }

    #[test]
    fn test_docs_url() {
        assert_eq!(
            client().docs_url("catalog-index", "search"),
            "https://myservice.search.windows.net/indexes/catalog-index/docs/search?api-version=2023-11-01"
        );
    }

    #[test]
    fn test_batch_body_tags_action() {
        let doc: Map<String, Value> =
            serde_json::from_str(r#"{"id": "1", "title": "Azure App Service"}"#).unwrap();

        let body = AzureSearchClient::batch_body(vec![doc]);
        assert_eq!(body["value"][0]["@search.action"], "mergeOrUpload");
        assert_eq!(body["value"][0]["id"], "1");
    }

    #[test]
    fn test_parse_error_message_json_body() {
        let body = r#"{"error": {"code": "", "message": "The request is invalid."}}"#;
        assert_eq!(parse_error_message(body), "The request is invalid.");
    }

    #[test]
    fn test_parse_error_message_plain_body() {
        assert_eq!(parse_error_message("Forbidden"), "Forbidden");
    }

    #[test]
    fn test_batch_response_parsing() {
        let body = r#"{
            "value": [
                {"key": "1", "status": true, "statusCode": 201},
                {"key": "2", "status": false, "statusCode": 400, "errorMessage": "dimension mismatch"}
            ]
        }"#;

        let batch: IndexBatchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(batch.value.len(), 2);
        assert!(batch.value[0].status);
        assert_eq!(
            batch.value[1].error_message.as_deref(),
            Some("dimension mismatch")
        );
    }
}
