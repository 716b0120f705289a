//! Embed command handler.
//!
//! One-off embedding request, useful for checking the provider setup and
//! the model's dimensions.

use clap::Args;
use searchlight_core::{config::AppConfig, AppResult};
use searchlight_embeddings::EmbeddingClient;

/// Request an embedding for a piece of text
#[derive(Args, Debug)]
pub struct EmbedCommand {
    /// Text to embed
    pub text: String,

    /// Print the full vector as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

impl EmbedCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        config.validate_embeddings()?;

        let client = searchlight_embeddings::create_client(&config.embeddings)?;

        tracing::info!(
            "Requesting embedding from '{}' model '{}'",
            client.provider_name(),
            client.model_name()
        );

        let vector = client.embed(&self.text).await?;

        if self.json {
            let output = serde_json::json!({
                "model": client.model_name(),
                "dimensions": vector.len(),
                "embedding": vector,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Model: {}", client.model_name());
            println!("Dimensions: {}", vector.len());
        }

        Ok(())
    }
}
