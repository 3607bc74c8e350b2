//! In-process sentence-transformer embedder.
//!
//! Runs the ONNX build of a small sentence-transformers model through
//! fastembed. The model is downloaded into the cache directory on first use
//! and read from there afterwards, so only the first run needs the network.
//!
//! Inference needs `&mut` access to the model, so it sits behind a mutex and
//! every batch runs on the blocking pool.

#[cfg(feature = "local-embeddings")]
use async_trait::async_trait;
#[cfg(feature = "local-embeddings")]
use std::sync::{Arc, Mutex};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::EmbeddingConfig;
#[cfg(feature = "local-embeddings")]
use crate::domain::ports::Embedder;

/// Models the local provider can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalModel {
    /// sentence-transformers/all-MiniLM-L6-v2
    AllMiniLmL6V2,
    /// BAAI/bge-small-en-v1.5
    BgeSmallEnV15,
}

impl LocalModel {
    /// Resolve `embedding.model`, with or without the hub organisation prefix
    pub fn from_name(name: &str) -> DomainResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "all-minilm-l6-v2" | "sentence-transformers/all-minilm-l6-v2" => {
                Ok(Self::AllMiniLmL6V2)
            }
            "bge-small-en-v1.5" | "baai/bge-small-en-v1.5" => Ok(Self::BgeSmallEnV15),
            _ => Err(DomainError::Configuration(format!(
                "unsupported local embedding model '{name}' \
                 (expected all-MiniLM-L6-v2 or bge-small-en-v1.5)"
            ))),
        }
    }

    /// Width of the vectors the model produces
    pub const fn dimension(self) -> usize {
        match self {
            Self::AllMiniLmL6V2 | Self::BgeSmallEnV15 => 384,
        }
    }
}

#[cfg(feature = "local-embeddings")]
impl From<LocalModel> for fastembed::EmbeddingModel {
    fn from(model: LocalModel) -> Self {
        match model {
            LocalModel::AllMiniLmL6V2 => Self::AllMiniLML6V2,
            LocalModel::BgeSmallEnV15 => Self::BGESmallENV15,
        }
    }
}

/// Check the embedding settings before any model is loaded
pub fn resolve_model(config: &EmbeddingConfig) -> DomainResult<LocalModel> {
    let model = LocalModel::from_name(&config.model)?;

    if config.dimension != model.dimension() {
        return Err(DomainError::Configuration(format!(
            "embedding.dimension is {} but {} produces {}-dimensional vectors",
            config.dimension,
            config.model,
            model.dimension()
        )));
    }
    if config.max_batch_size == 0 {
        return Err(DomainError::Configuration(
            "embedding.max_batch_size must be greater than 0".to_string(),
        ));
    }

    Ok(model)
}

/// Every vector must have `dimension` components, one per input text
#[cfg_attr(not(feature = "local-embeddings"), allow(dead_code))]
fn check_vectors(vectors: &[Vec<f32>], expected: usize, dimension: usize) -> DomainResult<()> {
    if vectors.len() != expected {
        return Err(DomainError::Embedding(format!(
            "expected {expected} embeddings, got {}",
            vectors.len()
        )));
    }
    if let Some((position, vector)) = vectors
        .iter()
        .enumerate()
        .find(|(_, vector)| vector.len() != dimension)
    {
        return Err(DomainError::DimensionMismatch {
            expected: dimension,
            found: vector.len(),
            position,
        });
    }
    Ok(())
}

/// fastembed-backed embedder
#[cfg(feature = "local-embeddings")]
pub struct LocalEmbedder {
    model: LocalModel,
    batch_size: usize,
    inner: Arc<Mutex<fastembed::TextEmbedding>>,
}

#[cfg(feature = "local-embeddings")]
impl LocalEmbedder {
    /// Load the configured model, downloading it on first use
    pub fn new(config: &EmbeddingConfig) -> DomainResult<Self> {
        let model = resolve_model(config)?;

        let mut options =
            fastembed::InitOptions::new(model.into()).with_show_download_progress(false);
        if let Some(dir) = &config.cache_dir {
            options = options.with_cache_dir(dir.into());
        }

        let inner = fastembed::TextEmbedding::try_new(options).map_err(|e| {
            DomainError::Embedding(format!("failed to load local model {}: {e}", config.model))
        })?;

        tracing::info!(
            model = %config.model,
            dimension = model.dimension(),
            "local embedding model loaded"
        );

        Ok(Self {
            model,
            batch_size: config.max_batch_size,
            inner: Arc::new(Mutex::new(inner)),
        })
    }
}

#[cfg(feature = "local-embeddings")]
#[async_trait]
impl Embedder for LocalEmbedder {
    fn name(&self) -> &'static str {
        "local"
    }

    fn dimension(&self) -> usize {
        self.model.dimension()
    }

    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let inner = Arc::clone(&self.inner);
        let owned = texts.to_vec();
        let batch_size = self.batch_size;

        let vectors = tokio::task::spawn_blocking(move || {
            let mut model = inner.lock().map_err(|_| {
                DomainError::Embedding("local embedding model lock poisoned".to_string())
            })?;
            model
                .embed(owned, Some(batch_size))
                .map_err(|e| DomainError::Embedding(format!("local embedding failed: {e}")))
        })
        .await
        .map_err(|e| DomainError::Embedding(format!("local embedding task panicked: {e}")))??;

        check_vectors(&vectors, texts.len(), self.dimension())?;
        tracing::debug!(count = vectors.len(), "embedded batch locally");

        Ok(vectors)
    }
}
