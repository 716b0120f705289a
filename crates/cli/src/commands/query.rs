//! Query command handler.
//!
//! The four query modes share one flow: embed the query text, build the
//! request, send it through the provider, print the normalized records.

use clap::{Args, Subcommand};
use searchlight_core::{config::AppConfig, AppResult};
use searchlight_embeddings::EmbeddingClient;
use searchlight_search::{SearchProvider, SearchQuery, SearchResults};

use super::index::provider_from_config;

/// Run a query against the index
#[derive(Args, Debug)]
pub struct QueryCommand {
    #[command(subcommand)]
    pub mode: QueryMode,
}

#[derive(Subcommand, Debug)]
pub enum QueryMode {
    /// Pure vector search (no keyword scoring)
    Vector(QueryArgs),
    /// Vector search restricted by a filter expression
    Filtered(QueryArgs),
    /// Hybrid keyword + vector search
    Hybrid(QueryArgs),
    /// Semantic hybrid search with extractive captions and answers
    Semantic(QueryArgs),
}

/// Shared query arguments
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Query text; embedded for the vector leg, and sent as keywords in
    /// hybrid modes
    pub text: String,

    /// Number of nearest neighbors for the vector leg
    #[arg(short, long, default_value = "5")]
    pub k: usize,

    /// Number of results to return (defaults to the configured size)
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Filter expression (e.g., "category eq 'Databases'")
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Comma-separated result-field projection
    #[arg(short, long, default_value = "title,content,category")]
    pub select: String,

    /// Vector field(s) to search
    #[arg(long, default_value = "contentVector")]
    pub vector_fields: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl QueryCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        config.validate_service()?;
        config.validate_embeddings()?;

        let (args, mode_name) = match &self.mode {
            QueryMode::Vector(args) => (args, "vector"),
            QueryMode::Filtered(args) => (args, "filtered"),
            QueryMode::Hybrid(args) => (args, "hybrid"),
            QueryMode::Semantic(args) => (args, "semantic"),
        };

        tracing::info!("Running {} query: {}", mode_name, args.text);

        let embeddings = searchlight_embeddings::create_client(&config.embeddings)?;
        let vector = embeddings.embed(&args.text).await?;

        let query = build_query(&self.mode, args, vector, config);

        let provider = provider_from_config(config)?;
        let results = provider.search(&config.index, &query).await?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            print_results(&results);
        }

        Ok(())
    }
}

/// Assemble the request body for the chosen mode.
fn build_query(
    mode: &QueryMode,
    args: &QueryArgs,
    vector: Vec<f32>,
    config: &AppConfig,
) -> SearchQuery {
    let mut query = SearchQuery::vector(vector, args.k, args.vector_fields.as_str())
        .with_select(args.select.as_str())
        .with_top(args.top.unwrap_or(config.top));

    if let Some(filter) = &args.filter {
        query = query.with_filter(filter.as_str());
    }

    match mode {
        QueryMode::Vector(_) | QueryMode::Filtered(_) => query,
        QueryMode::Hybrid(_) => query.with_text(args.text.as_str()),
        QueryMode::Semantic(_) => query.with_text(args.text.as_str()).semantic(
            config.semantic_configuration.as_str(),
            config.language.as_str(),
            3,
        ),
    }
}

/// Human-readable output: answers first (semantic mode), then the ranked
/// records, then the total count.
fn print_results(results: &SearchResults) {
    for answer in &results.answers {
        println!("Answer (score {:.3}):", answer.score);
        println!("  {}", answer.text);
        println!();
    }

    for hit in &results.hits {
        if let Some(title) = hit.field_str("title") {
            println!("Title: {}", title);
        }
        println!("Score: {:.5}", hit.score);
        if let Some(reranker) = hit.reranker_score {
            println!("Reranker Score: {:.5}", reranker);
        }
        if let Some(category) = hit.field_str("category") {
            println!("Category: {}", category);
        }
        if let Some(caption) = &hit.caption {
            println!("Caption: {}", caption);
        }
        println!();
    }

    match results.total_count {
        Some(count) => println!("Total Results: {}", count),
        None => println!("Total Results: {}", results.len()),
    }
}
