//! Embedding client abstraction.
//!
//! This module defines the trait all embedding providers implement.

use searchlight_core::{AppError, AppResult};

/// Trait for embedding providers.
///
/// Abstracts the hosted embedding endpoint (OpenAI-compatible, mock, etc.)
/// behind a uniform batch interface.
#[async_trait::async_trait]
pub trait EmbeddingClient: Send + Sync + std::fmt::Debug {
    /// Get the provider name (e.g., "openai", "mock").
    fn provider_name(&self) -> &str;

    /// Get the model identifier.
    fn model_name(&self) -> &str;

    /// Get the output dimensions of the model.
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in a single request.
    ///
    /// Returns one vector per input text, in input order.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate an embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Embedding("No embedding returned".to_string()))
    }
}
