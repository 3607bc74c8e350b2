//! Domain errors for the docsift retrieval engine.

use std::path::PathBuf;
use thiserror::Error;

/// Domain-level errors that can occur while building or querying an index.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Dimension mismatch at position {position}: expected {expected}, found {found}")]
    DimensionMismatch {
        expected: usize,
        found: usize,
        position: usize,
    },

    #[error("Shape mismatch: {vectors} vectors but {metadata} metadata records")]
    ShapeMismatch { vectors: usize, metadata: usize },

    #[error("Search against an empty index")]
    EmptyIndex,

    #[error("Failed to extract text from {path}: {reason}")]
    Extraction { path: PathBuf, reason: String },

    #[error("Index file not found: {0}. Run `docsift ingest` first.")]
    MissingIndex(PathBuf),

    #[error("OCR binary '{binary}' not found (searched: {searched})")]
    OcrBinaryNotFound { binary: String, searched: String },

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for DomainError {
    fn from(err: bincode::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}
