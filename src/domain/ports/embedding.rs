//! Embedding provider port for semantic vector generation.
//!
//! Defines the trait for embedding providers that convert text into
//! dense vector representations. Providers are opaque to the engine:
//! text in, fixed-length vector out.

use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};

/// Trait for embedding providers.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Provider name (e.g., "hashing", "openai").
    fn name(&self) -> &'static str;

    /// Embedding dimension for this provider/model.
    fn dimension(&self) -> usize;

    /// Generate embeddings for many texts, positionally aligned with the input.
    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>>;

    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
        self.embed_batch(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Embedding("empty embedding response".to_string()))
    }
}
