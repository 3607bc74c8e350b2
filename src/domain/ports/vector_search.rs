//! Nearest-neighbor search port.
//!
//! The brute-force `FlatIndex` is the only implementation today; anything
//! that can answer k-NN queries over the same chunk metadata can stand in.

use crate::domain::errors::DomainResult;
use crate::domain::models::{DistanceMetric, SearchHit};

/// Read-only k-nearest-neighbor index over chunk embeddings.
pub trait VectorSearch: Send + Sync {
    /// Up to `k` hits ordered closest first; ties keep insertion order.
    fn search(&self, query: &[f32], k: usize) -> DomainResult<Vec<SearchHit>>;

    /// Number of indexed vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vector dimension, zero for an empty index.
    fn dimension(&self) -> usize;

    fn metric(&self) -> DistanceMetric;
}
