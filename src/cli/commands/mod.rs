//! CLI command implementations.

pub mod ask;
pub mod history;
pub mod ingest;
pub mod query;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::adapters::embeddings::build_embedder;
use crate::domain::errors::DomainError;
use crate::domain::models::Config;
use crate::domain::ports::VectorSearch;
use crate::infrastructure::vector::{load_index, IndexPaths};
use crate::services::Retriever;

/// Load the saved index and pair it with the configured embedder
///
/// Fails with a dimension mismatch when the embedder's vectors differ in
/// width from the stored ones.
pub(crate) fn open_retriever(config: &Config) -> Result<Retriever> {
    let paths = IndexPaths::from(&config.index);
    let index = load_index(&paths)
        .with_context(|| format!("Failed to load index from {}", paths.index.display()))?;

    let embedder = build_embedder(&config.embedding).context("Failed to set up embedder")?;

    if !index.is_empty() && index.dimension() != embedder.dimension() {
        return Err(DomainError::DimensionMismatch {
            expected: index.dimension(),
            found: embedder.dimension(),
            position: 0,
        })
        .with_context(|| {
            format!(
                "The '{}' embedder does not match the saved index. \
                 Re-run `docsift ingest` or fix embedding.dimension.",
                embedder.name()
            )
        });
    }

    tracing::info!(
        chunks = index.len(),
        metric = %index.metric(),
        embedder = embedder.name(),
        "index loaded"
    );

    Ok(Retriever::new(embedder, Arc::new(index))
        .with_max_distance(config.retrieval.max_distance))
}
