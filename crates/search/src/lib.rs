//! Searchlight Search Library
//!
//! Request construction and response normalization for a hosted
//! vector-search service. The service owns the hard parts (ANN indexing,
//! lexical scoring, semantic reranking); this crate owns:
//!
//! - the index definition model (`schema`),
//! - the query builder covering pure vector, filtered vector, hybrid, and
//!   semantic hybrid modes (`query`),
//! - normalization of paginated responses into printable records
//!   (`results`),
//! - the `SearchProvider` seam and its REST implementation (`provider`,
//!   `providers::azure`),
//! - document ingestion with client-side dimension validation (`ingest`).

pub mod ingest;
pub mod provider;
pub mod providers;
pub mod query;
pub mod results;
pub mod schema;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use ingest::{ingest_documents, IngestOptions, IngestSummary};
pub use provider::{SearchProvider, UploadResult, UploadSummary};
pub use providers::azure::AzureSearchClient;
pub use query::{SearchQuery, VectorQuery};
pub use results::{Answer, SearchHit, SearchResults};
pub use schema::{FieldType, IndexSchema, SchemaField, SemanticSearch, VectorSearch};
