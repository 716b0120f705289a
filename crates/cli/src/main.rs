//! Searchlight CLI
//!
//! Main entry point for the searchlight command-line tool.
//! Drives a hosted vector-search index: schema creation, document
//! ingestion with computed embeddings, and the four query modes.

mod commands;

use clap::{Parser, Subcommand};
use commands::{EmbedCommand, IndexCommand, QueryCommand};
use searchlight_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Searchlight CLI - hosted vector search from the command line
#[derive(Parser, Debug)]
#[command(name = "searchlight")]
#[command(about = "Vector, hybrid, and semantic search against a hosted index", long_about = None)]
#[command(version)]
struct Cli {
    /// Search service endpoint URL
    #[arg(short, long, global = true, env = "SEARCHLIGHT_ENDPOINT")]
    endpoint: Option<String>,

    /// Search index name
    #[arg(short, long, global = true, env = "SEARCHLIGHT_INDEX")]
    index: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true, env = "SEARCHLIGHT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Index management (create schema, load documents)
    Index(IndexCommand),

    /// Run a query against the index
    Query(QueryCommand),

    /// Request an embedding for a piece of text
    Embed(EmbedCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.endpoint,
        cli.index,
        cli.config,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Searchlight CLI starting");
    tracing::debug!("Endpoint: {}", config.endpoint);
    tracing::debug!("Index: {}", config.index);

    let command_name = match &cli.command {
        Commands::Index(_) => "index",
        Commands::Query(_) => "query",
        Commands::Embed(_) => "embed",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Index(cmd) => cmd.execute(&config).await,
        Commands::Query(cmd) => cmd.execute(&config).await,
        Commands::Embed(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
