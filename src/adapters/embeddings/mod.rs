//! Embedding provider adapters.

pub mod hashing;
pub mod local;
pub mod openai;

use std::sync::Arc;

pub use hashing::HashingEmbedder;
#[cfg(feature = "local-embeddings")]
pub use local::LocalEmbedder;
pub use local::LocalModel;
pub use openai::OpenAiEmbedder;

use crate::domain::errors::DomainResult;
use crate::domain::models::{EmbeddingConfig, EmbeddingProviderKind};
use crate::domain::ports::Embedder;

/// Build the embedder selected by `config.provider`
pub fn build_embedder(config: &EmbeddingConfig) -> DomainResult<Arc<dyn Embedder>> {
    let embedder: Arc<dyn Embedder> = match config.provider {
        EmbeddingProviderKind::Local => local_embedder(config)?,
        EmbeddingProviderKind::Hashing => Arc::new(HashingEmbedder::new(config.dimension)?),
        EmbeddingProviderKind::Openai => Arc::new(OpenAiEmbedder::new(config.clone())?),
    };

    tracing::debug!(
        provider = embedder.name(),
        dimension = embedder.dimension(),
        "embedder ready"
    );

    Ok(embedder)
}

#[cfg(feature = "local-embeddings")]
fn local_embedder(config: &EmbeddingConfig) -> DomainResult<Arc<dyn Embedder>> {
    Ok(Arc::new(LocalEmbedder::new(config)?))
}

#[cfg(not(feature = "local-embeddings"))]
fn local_embedder(config: &EmbeddingConfig) -> DomainResult<Arc<dyn Embedder>> {
    local::resolve_model(config)?;
    Err(crate::domain::errors::DomainError::Configuration(
        "the local embedding provider needs the `local-embeddings` feature; \
         rebuild with it or set embedding.provider to hashing or openai"
            .to_string(),
    ))
}
