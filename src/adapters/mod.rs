//! Adapters for external systems: embedding providers.

pub mod embeddings;
