//! OpenAI-compatible embedding provider.
//!
//! Talks to a hosted `POST {base}/embeddings` endpoint with bearer-token
//! auth. The same wire shape is served by OpenAI and by Azure OpenAI
//! deployments exposed through a compatibility endpoint.

use crate::client::EmbeddingClient;
use searchlight_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Embedding API request format.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

/// Embedding API response format.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
    #[serde(default)]
    model: Option<String>,
}

/// A single embedding entry in the response.
#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

/// Client for a hosted OpenAI-compatible embedding endpoint.
#[derive(Debug)]
pub struct OpenAiClient {
    /// Base URL of the API (e.g., "https://api.openai.com/v1")
    base_url: String,

    /// Bearer token
    api_key: String,

    /// Model to request embeddings from
    model: String,

    /// Expected output dimensions
    dimensions: usize,

    /// HTTP client
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new client.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            dimensions,
            client: reqwest::Client::new(),
        }
    }

    fn embeddings_url(&self) -> String {
        format!("{}/embeddings", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl EmbeddingClient for OpenAiClient {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!("Requesting {} embeddings from {}", texts.len(), self.model);

        let request = EmbeddingsRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(self.embeddings_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Http(format!("Embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Api { status, message });
        }

        let body: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| AppError::Embedding(format!("Failed to parse embedding response: {}", e)))?;

        if body.data.is_empty() {
            return Err(AppError::Embedding(
                "Embedding response contained no data".to_string(),
            ));
        }

        if body.data.len() != texts.len() {
            return Err(AppError::Embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                body.data.len()
            )));
        }

        // The service may return entries out of order; restore input order.
        let mut data = body.data;
        data.sort_by_key(|d| d.index);

        tracing::debug!(
            "Received {} embeddings from model {:?}",
            data.len(),
            body.model
        );

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::new(
            "https://api.openai.com/v1",
            "sk-test",
            "text-embedding-ada-002",
            1536,
        );
        assert_eq!(client.provider_name(), "openai");
        assert_eq!(client.model_name(), "text-embedding-ada-002");
        assert_eq!(client.dimensions(), 1536);
    }

    #[test]
    fn test_embeddings_url_trims_trailing_slash() {
        let client = OpenAiClient::new("https://api.openai.com/v1/", "k", "m", 8);
        assert_eq!(client.embeddings_url(), "https://api.openai.com/v1/embeddings");
    }

    #[test]
    fn test_request_serialization() {
        let input = vec!["hello".to_string()];
        let request = EmbeddingsRequest {
            model: "text-embedding-ada-002",
            input: &input,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "text-embedding-ada-002",
                "input": ["hello"],
            })
        );
    }

    #[test]
    fn test_response_parsing_restores_order() {
        let body = r#"{
            "object": "list",
            "data": [
                {"object": "embedding", "embedding": [0.3, 0.4], "index": 1},
                {"object": "embedding", "embedding": [0.1, 0.2], "index": 0}
            ],
            "model": "text-embedding-ada-002",
            "usage": {"prompt_tokens": 4, "total_tokens": 4}
        }"#;

        let parsed: EmbeddingsResponse = serde_json::from_str(body).unwrap();
        let mut data = parsed.data;
        data.sort_by_key(|d| d.index);

        assert_eq!(data[0].embedding, vec![0.1, 0.2]);
        assert_eq!(data[1].embedding, vec![0.3, 0.4]);
    }
}
