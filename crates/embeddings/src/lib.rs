//! Searchlight Embeddings Library
//!
//! This crate is the embedding requester: it sends UTF-8 text to a hosted
//! embedding endpoint and returns fixed-length float vectors. There is no
//! local retry or caching; every call is a direct pass-through and every
//! failure is an explicit error.

pub mod client;
pub mod factory;
pub mod providers;

// Re-export commonly used types
pub use client::EmbeddingClient;
pub use factory::create_client;
