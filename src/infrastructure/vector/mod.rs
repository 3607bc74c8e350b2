//! Vector index infrastructure
//!
//! Exact brute-force search over chunk embeddings and the two-file on-disk
//! format the index is persisted in.

pub mod flat_index;
pub mod persistence;

pub use flat_index::FlatIndex;
pub use persistence::{load_index, save_index, IndexPaths};
