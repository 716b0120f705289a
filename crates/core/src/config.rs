//! Configuration management for the Searchlight CLI.
//!
//! This module handles loading and merging configuration from multiple
//! sources:
//! - Environment variables
//! - Command-line flags
//! - A YAML config file (searchlight.yaml)
//!
//! Precedence, lowest to highest: defaults, config file, environment
//! variables, CLI flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default REST API version of the hosted search service.
pub const DEFAULT_API_VERSION: &str = "2023-11-01";

/// Default embedding dimensions (text-embedding-ada-002 output size).
pub const DEFAULT_DIMENSIONS: usize = 1536;

/// Main application configuration.
///
/// This struct holds everything the CLI needs to reach the hosted search
/// service and the hosted embedding endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Search service endpoint URL (e.g., "https://myservice.search.windows.net")
    pub endpoint: String,

    /// Admin/query API key for the search service
    pub api_key: Option<String>,

    /// Name of the search index to manage and query
    pub index: String,

    /// REST API version sent with every search-service request
    pub api_version: String,

    /// Embedding provider settings
    pub embeddings: EmbeddingSettings,

    /// Default number of results to request per query
    pub top: usize,

    /// Named semantic configuration declared on the index
    pub semantic_configuration: String,

    /// Named vector-search profile declared on the index
    pub vector_profile: String,

    /// Query language for semantic queries
    pub language: String,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Embedding provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// Provider identifier ("openai" or "mock")
    pub provider: String,

    /// Base URL of the embedding endpoint
    pub endpoint: String,

    /// API key for the embedding endpoint
    pub api_key: Option<String>,

    /// Embedding model name
    pub model: String,

    /// Output dimensions of the embedding model.
    ///
    /// Must match the dimensions declared on the index's vector fields;
    /// uploads are validated against this before any network call.
    pub dimensions: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "text-embedding-ada-002".to_string(),
            dimensions: DEFAULT_DIMENSIONS,
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    service: Option<ServiceConfig>,
    embeddings: Option<EmbeddingsFileConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServiceConfig {
    endpoint: Option<String>,
    index: Option<String>,
    #[serde(rename = "apiVersion")]
    api_version: Option<String>,
    #[serde(rename = "semanticConfiguration")]
    semantic_configuration: Option<String>,
    #[serde(rename = "vectorProfile")]
    vector_profile: Option<String>,
    language: Option<String>,
    top: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmbeddingsFileConfig {
    provider: Option<String>,
    endpoint: Option<String>,
    model: Option<String>,
    dimensions: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            index: "catalog-index".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            embeddings: EmbeddingSettings::default(),
            top: 5,
            semantic_configuration: "semantic-default".to_string(),
            vector_profile: "vector-profile".to_string(),
            language: "en-us".to_string(),
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `SEARCHLIGHT_ENDPOINT`: search service endpoint URL
    /// - `SEARCHLIGHT_API_KEY`: search service API key
    /// - `SEARCHLIGHT_INDEX`: index name
    /// - `SEARCHLIGHT_CONFIG`: path to config file
    /// - `SEARCHLIGHT_EMBEDDING_ENDPOINT`: embedding endpoint URL
    /// - `SEARCHLIGHT_EMBEDDING_API_KEY` (or `OPENAI_API_KEY`): embedding key
    /// - `SEARCHLIGHT_EMBEDDING_MODEL`: embedding model name
    /// - `RUST_LOG`: log level
    /// - `NO_COLOR`: disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("SEARCHLIGHT_CONFIG") {
            config.config_file = Some(PathBuf::from(path));
        }

        // Config file first, so environment variables can override it
        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("searchlight.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        if let Ok(endpoint) = std::env::var("SEARCHLIGHT_ENDPOINT") {
            config.endpoint = endpoint;
        }

        if let Ok(index) = std::env::var("SEARCHLIGHT_INDEX") {
            config.index = index;
        }

        config.api_key = std::env::var("SEARCHLIGHT_API_KEY").ok().or(config.api_key);

        if let Ok(endpoint) = std::env::var("SEARCHLIGHT_EMBEDDING_ENDPOINT") {
            config.embeddings.endpoint = endpoint;
        }

        if let Ok(model) = std::env::var("SEARCHLIGHT_EMBEDDING_MODEL") {
            config.embeddings.model = model;
        }

        config.embeddings.api_key = std::env::var("SEARCHLIGHT_EMBEDDING_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok()
            .or(config.embeddings.api_key);

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(service) = config_file.service {
            if let Some(endpoint) = service.endpoint {
                result.endpoint = endpoint;
            }
            if let Some(index) = service.index {
                result.index = index;
            }
            if let Some(api_version) = service.api_version {
                result.api_version = api_version;
            }
            if let Some(name) = service.semantic_configuration {
                result.semantic_configuration = name;
            }
            if let Some(name) = service.vector_profile {
                result.vector_profile = name;
            }
            if let Some(language) = service.language {
                result.language = language;
            }
            if let Some(top) = service.top {
                result.top = top;
            }
        }

        if let Some(embeddings) = config_file.embeddings {
            if let Some(provider) = embeddings.provider {
                result.embeddings.provider = provider;
            }
            if let Some(endpoint) = embeddings.endpoint {
                result.embeddings.endpoint = endpoint;
            }
            if let Some(model) = embeddings.model {
                result.embeddings.model = model;
            }
            if let Some(dimensions) = embeddings.dimensions {
                result.embeddings.dimensions = dimensions;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the
    /// config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        index: Option<String>,
        config_file: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }

        if let Some(index) = index {
            self.index = index;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate that the config can reach the search service.
    pub fn validate_service(&self) -> AppResult<()> {
        if self.endpoint.is_empty() {
            return Err(AppError::Config(
                "Search endpoint not set. Use SEARCHLIGHT_ENDPOINT or the config file."
                    .to_string(),
            ));
        }

        if self.api_key.as_deref().unwrap_or("").is_empty() {
            return Err(AppError::Config(
                "Search API key not set. Use SEARCHLIGHT_API_KEY.".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate that the config can reach the embedding provider.
    ///
    /// The mock provider needs no credentials.
    pub fn validate_embeddings(&self) -> AppResult<()> {
        if self.embeddings.provider == "mock" {
            return Ok(());
        }

        if self.embeddings.api_key.as_deref().unwrap_or("").is_empty() {
            return Err(AppError::Config(
                "Embedding API key not set. Use SEARCHLIGHT_EMBEDDING_API_KEY or OPENAI_API_KEY."
                    .to_string(),
            ));
        }

        Ok(())
    }
}
