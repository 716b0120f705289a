//! Search provider implementations.

pub mod azure;

pub use azure::AzureSearchClient;
