//! Mock embedding provider.
//!
//! Produces deterministic, content-dependent vectors without any network
//! calls. Not semantically meaningful, but stable across runs, which is
//! what tests and dry runs need.

use crate::client::EmbeddingClient;
use searchlight_core::AppResult;

/// Offline embedding provider for tests and dry runs.
#[derive(Debug)]
pub struct MockClient {
    dimensions: usize,
}

impl MockClient {
    /// Create a new mock client with the given output dimensions.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// FNV-1a over the word bytes, salted per probe.
    fn hash_word(word: &str, salt: u64) -> u64 {
        let mut h = 0xcbf29ce484222325u64 ^ salt;
        for b in word.bytes() {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        h
    }

    fn generate(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];

        for word in text.to_lowercase().split_whitespace() {
            // Spread each word over a few dimensions so short texts still
            // produce distinguishable vectors.
            for salt in 0..4u64 {
                let h = Self::hash_word(word, salt);
                let dim = (h as usize) % self.dimensions;
                let sign = if h & (1 << 63) == 0 { 1.0 } else { -1.0 };
                embedding[dim] += sign;
            }
        }

        // Normalize to a unit vector
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut embedding {
                *v /= norm;
            }
        }

        embedding
    }
}

#[async_trait::async_trait]
impl EmbeddingClient for MockClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-hash-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.generate(t)).collect())
    }
}
