//! Embedding provider factory.
//!
//! Creates an embedding client from the application's embedding settings.

use crate::client::EmbeddingClient;
use crate::providers::{MockClient, OpenAiClient};
use searchlight_core::config::EmbeddingSettings;
use searchlight_core::{AppError, AppResult};
use std::sync::Arc;

/// Create an embedding client based on configuration.
///
/// # Errors
/// Returns an error if the provider is unknown or a required API key is
/// missing.
pub fn create_client(settings: &EmbeddingSettings) -> AppResult<Arc<dyn EmbeddingClient>> {
    match settings.provider.to_lowercase().as_str() {
        "openai" => {
            let api_key = settings.api_key.as_deref().ok_or_else(|| {
                AppError::Config("OpenAI embedding provider requires an API key".to_string())
            })?;
            let client = OpenAiClient::new(
                settings.endpoint.as_str(),
                api_key,
                settings.model.as_str(),
                settings.dimensions,
            );
            Ok(Arc::new(client))
        }
        "mock" => Ok(Arc::new(MockClient::new(settings.dimensions))),
        other => Err(AppError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: openai, mock",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(provider: &str, api_key: Option<&str>) -> EmbeddingSettings {
        EmbeddingSettings {
            provider: provider.to_string(),
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: api_key.map(|k| k.to_string()),
            model: "text-embedding-ada-002".to_string(),
            dimensions: 1536,
        }
    }

    #[test]
    fn test_create_mock_client() {
        let client = create_client(&settings("mock", None)).unwrap();
        assert_eq!(client.provider_name(), "mock");
        assert_eq!(client.dimensions(), 1536);
    }

    #[test]
    fn test_create_openai_client() {
        let client = create_client(&settings("openai", Some("sk-test"))).unwrap();
        assert_eq!(client.provider_name(), "openai");
        assert_eq!(client.model_name(), "text-embedding-ada-002");
    }

    #[test]
    fn test_openai_requires_api_key() {
        let result = create_client(&settings("openai", None));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_provider() {
        let result = create_client(&settings("cohere", None));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown embedding provider"));
    }
}
