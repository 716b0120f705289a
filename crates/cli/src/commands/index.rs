//! Index command handler.
//!
//! Declares the demo catalog schema and loads documents into it.

use clap::{Args, Subcommand};
use searchlight_core::{config::AppConfig, AppError, AppResult};
use searchlight_search::schema::{FieldType, SchemaField};
use searchlight_search::{
    ingest_documents, AzureSearchClient, IndexSchema, IngestOptions, SearchProvider,
    SemanticSearch, VectorSearch,
};
use std::path::PathBuf;

/// Index management
#[derive(Args, Debug)]
pub struct IndexCommand {
    #[command(subcommand)]
    pub action: IndexAction,
}

#[derive(Subcommand, Debug)]
pub enum IndexAction {
    /// Create or update the index schema
    Create(IndexCreateCommand),
    /// Embed and upload documents from a JSON file
    Load(IndexLoadCommand),
}

/// Create or update the index schema
#[derive(Args, Debug)]
pub struct IndexCreateCommand {}

impl IndexCreateCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        config.validate_service()?;

        let schema = catalog_schema(config);
        let provider = provider_from_config(config)?;

        provider.ensure_index(&schema).await?;

        println!("Index '{}' created or updated", schema.name);
        Ok(())
    }
}

/// Embed and upload documents
#[derive(Args, Debug)]
pub struct IndexLoadCommand {
    /// JSON file holding an array of documents
    #[arg(long)]
    pub file: PathBuf,

    /// Document field whose text is embedded
    #[arg(long, default_value = "content")]
    pub text_field: String,

    /// Vector field the embedding is written to
    #[arg(long, default_value = "contentVector")]
    pub vector_field: String,
}

impl IndexLoadCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        config.validate_service()?;
        config.validate_embeddings()?;

        tracing::info!("Loading documents from {:?}", self.file);

        let contents = std::fs::read_to_string(&self.file)?;
        let documents: Vec<serde_json::Value> = serde_json::from_str(&contents)?;

        if documents.is_empty() {
            return Err(AppError::Search(format!(
                "No documents found in {:?}",
                self.file
            )));
        }

        let schema = catalog_schema(config);
        let provider = provider_from_config(config)?;
        let embeddings = searchlight_embeddings::create_client(&config.embeddings)?;

        let options = IngestOptions {
            text_field: self.text_field.clone(),
            vector_field: self.vector_field.clone(),
        };

        let summary = ingest_documents(
            provider.as_ref(),
            embeddings.as_ref(),
            &schema,
            documents,
            &options,
        )
        .await?;

        println!(
            "Uploaded {} documents ({} embedded) to index '{}'",
            summary.uploaded, summary.embedded, schema.name
        );
        Ok(())
    }
}

impl IndexCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.action {
            IndexAction::Create(cmd) => cmd.execute(config).await,
            IndexAction::Load(cmd) => cmd.execute(config).await,
        }
    }
}

/// Build the REST provider from configuration.
pub fn provider_from_config(config: &AppConfig) -> AppResult<Box<dyn SearchProvider>> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| AppError::Config("Search API key not set".to_string()))?;

    Ok(Box::new(AzureSearchClient::new(
        config.endpoint.as_str(),
        api_key,
        config.api_version.as_str(),
    )))
}

/// The demo catalog schema: id, title, content, category plus two vector
/// fields sized to the configured embedding model.
pub fn catalog_schema(config: &AppConfig) -> IndexSchema {
    let dimensions = config.embeddings.dimensions;
    let profile = config.vector_profile.as_str();

    IndexSchema::new(config.index.as_str())
        .with_field(SchemaField::new("id", FieldType::String).key().filterable())
        .with_field(
            SchemaField::new("title", FieldType::String)
                .searchable()
                .sortable(),
        )
        .with_field(SchemaField::new("content", FieldType::String).searchable())
        .with_field(
            SchemaField::new("category", FieldType::String)
                .searchable()
                .filterable()
                .facetable(),
        )
        .with_field(
            SchemaField::new("titleVector", FieldType::SingleCollection)
                .vector(dimensions, profile),
        )
        .with_field(
            SchemaField::new("contentVector", FieldType::SingleCollection)
                .vector(dimensions, profile),
        )
        .with_vector_search(VectorSearch::hnsw("hnsw-default", profile))
        .with_semantic(SemanticSearch::single(
            config.semantic_configuration.as_str(),
            "title",
            &["content"],
            &["category"],
        ))
}
