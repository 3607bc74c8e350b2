//! Query-time retrieval
//!
//! Embeds a query and looks up its nearest chunks in the index.

use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Chunk, SearchHit};
use crate::domain::ports::{Embedder, VectorSearch};

/// Embeds queries and returns the closest chunks, best first
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorSearch>,
    max_distance: Option<f32>,
}

impl Retriever {
    /// Retriever over `index` using `embedder` for queries
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorSearch>) -> Self {
        Self {
            embedder,
            index,
            max_distance: None,
        }
    }

    /// Drop hits farther than `max_distance`; `None` keeps every hit
    #[must_use]
    pub fn with_max_distance(mut self, max_distance: Option<f32>) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Embedder used for queries
    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    /// Up to `k` hits with their distances, closest first
    ///
    /// An empty index yields no hits rather than an error.
    pub async fn retrieve_scored(&self, query: &str, k: usize) -> DomainResult<Vec<SearchHit>> {
        if self.index.is_empty() {
            tracing::debug!("retrieval against empty index");
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed(query).await?;
        let mut hits = self.index.search(&query_vector, k)?;

        if let Some(max_distance) = self.max_distance {
            hits.retain(|hit| hit.distance <= max_distance);
        }

        tracing::debug!(k, hits = hits.len(), "retrieved chunks");
        Ok(hits)
    }

    /// Up to `k` chunks, closest first
    pub async fn retrieve(&self, query: &str, k: usize) -> DomainResult<Vec<Chunk>> {
        Ok(self
            .retrieve_scored(query, k)
            .await?
            .into_iter()
            .map(|hit| hit.chunk)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::domain::models::DistanceMetric;
    use crate::infrastructure::vector::FlatIndex;
    use async_trait::async_trait;

    /// Maps known words onto fixed 2D points
    struct CompassEmbedder;

    #[async_trait]
    impl Embedder for CompassEmbedder {
        fn name(&self) -> &'static str {
            "compass"
        }

        fn dimension(&self) -> usize {
            2
        }

        async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| match t.as_str() {
                    "north" => vec![0.0, 1.0],
                    "east" => vec![1.0, 0.0],
                    _ => vec![-1.0, -1.0],
                })
                .collect())
        }
    }

    fn retriever() -> Retriever {
        let vectors = vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![0.7, 0.7]];
        let chunks = vec![
            Chunk::new(0, "north text", "n.pdf"),
            Chunk::new(1, "east text", "e.pdf"),
            Chunk::new(2, "north-east text", "ne.pdf"),
        ];
        let index = FlatIndex::build(vectors, chunks, DistanceMetric::L2).unwrap();
        Retriever::new(Arc::new(CompassEmbedder), Arc::new(index))
    }

    #[tokio::test]
    async fn test_retrieve_orders_by_distance() {
        let chunks = retriever().retrieve("north", 2).await.unwrap();
        let ids: Vec<usize> = chunks.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[tokio::test]
    async fn test_retrieve_scored_keeps_distances() {
        let hits = retriever().retrieve_scored("east", 3).await.unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].chunk.id, 1);
        assert!(hits[0].distance.abs() < 1e-6);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[tokio::test]
    async fn test_max_distance_floor() {
        let retriever = retriever().with_max_distance(Some(0.5));
        let hits = retriever.retrieve_scored("north", 3).await.unwrap();
        // north-east sits at 0.49 + 0.09 = 0.58 from north
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chunk.id, 0);
    }

    #[tokio::test]
    async fn test_empty_index_yields_nothing() {
        let index = FlatIndex::build(Vec::new(), Vec::new(), DistanceMetric::L2).unwrap();
        let retriever = Retriever::new(Arc::new(CompassEmbedder), Arc::new(index));
        assert!(retriever.retrieve("north", 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_k_is_rejected() {
        assert!(matches!(
            retriever().retrieve("north", 0).await,
            Err(DomainError::Configuration(_))
        ));
    }
}
