//! Brute-force vector index
//!
//! Stores every chunk embedding in one contiguous buffer next to the chunk
//! metadata and answers k-NN queries with a full scan. At the corpus sizes
//! docsift targets (thousands of chunks) a scan is fast enough and exact.

use std::cmp::Ordering;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Chunk, DistanceMetric, SearchHit};
use crate::domain::ports::VectorSearch;

/// Exact nearest-neighbor index over chunk embeddings
///
/// Invariant: `vectors.len() == chunks.len() * dimension`, and row `i` of
/// `vectors` belongs to `chunks[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatIndex {
    metric: DistanceMetric,
    dimension: usize,
    vectors: Vec<f32>,
    chunks: Vec<Chunk>,
}

impl FlatIndex {
    /// Build an index from aligned vectors and chunk metadata
    ///
    /// # Errors
    /// * `ShapeMismatch` - vector and metadata counts differ
    /// * `DimensionMismatch` - vectors have inconsistent lengths
    pub fn build(
        vectors: Vec<Vec<f32>>,
        chunks: Vec<Chunk>,
        metric: DistanceMetric,
    ) -> DomainResult<Self> {
        if vectors.len() != chunks.len() {
            return Err(DomainError::ShapeMismatch {
                vectors: vectors.len(),
                metadata: chunks.len(),
            });
        }

        let dimension = vectors.first().map_or(0, Vec::len);
        if dimension == 0 && !vectors.is_empty() {
            return Err(DomainError::Configuration(
                "embedding vectors must not be empty".to_string(),
            ));
        }

        let mut flat = Vec::with_capacity(dimension * vectors.len());

        for (position, vector) in vectors.into_iter().enumerate() {
            if vector.len() != dimension {
                return Err(DomainError::DimensionMismatch {
                    expected: dimension,
                    found: vector.len(),
                    position,
                });
            }
            flat.extend(vector);
        }

        tracing::debug!(
            vectors = chunks.len(),
            dimension,
            metric = %metric,
            "built flat index"
        );

        Ok(Self {
            metric,
            dimension,
            vectors: flat,
            chunks,
        })
    }

    /// Rebuild from the flat buffer read back off disk
    pub(crate) fn from_parts(
        metric: DistanceMetric,
        dimension: usize,
        vectors: Vec<f32>,
        chunks: Vec<Chunk>,
    ) -> DomainResult<Self> {
        let rows = if dimension == 0 {
            0
        } else {
            vectors.len() / dimension
        };

        if rows * dimension != vectors.len() || rows != chunks.len() {
            return Err(DomainError::ShapeMismatch {
                vectors: rows,
                metadata: chunks.len(),
            });
        }

        Ok(Self {
            metric,
            dimension,
            vectors,
            chunks,
        })
    }

    /// Chunks in row order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Embedding stored for chunk `position`
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        if position >= self.chunks.len() {
            return None;
        }
        let start = position * self.dimension;
        Some(&self.vectors[start..start + self.dimension])
    }

    pub(crate) fn raw_vectors(&self) -> &[f32] {
        &self.vectors
    }
}

impl VectorSearch for FlatIndex {
    fn search(&self, query: &[f32], k: usize) -> DomainResult<Vec<SearchHit>> {
        if k == 0 {
            return Err(DomainError::Configuration(
                "k must be greater than 0".to_string(),
            ));
        }

        if self.chunks.is_empty() {
            return Err(DomainError::EmptyIndex);
        }

        if query.len() != self.dimension {
            return Err(DomainError::DimensionMismatch {
                expected: self.dimension,
                found: query.len(),
                position: 0,
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .chunks_exact(self.dimension)
            .map(|row| self.metric.distance(query, row))
            .enumerate()
            .collect();

        // Stable sort: equal distances keep insertion order. NaN sorts last.
        scored.sort_by(|a, b| match (a.1.is_nan(), b.1.is_nan()) {
            (false, false) => a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal),
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (true, true) => Ordering::Equal,
        });
        scored.truncate(k);

        let hits: Vec<SearchHit> = scored
            .into_iter()
            .map(|(position, distance)| SearchHit {
                chunk: self.chunks[position].clone(),
                distance,
            })
            .collect();

        tracing::trace!(k, hits = hits.len(), "flat index search");

        Ok(hits)
    }

    fn len(&self) -> usize {
        self.chunks.len()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn metric(&self) -> DistanceMetric {
        self.metric
    }
}
