//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that infrastructure adapters implement:
//! - Embedder: text to vector
//! - VectorSearch: k-nearest-neighbor lookup over chunk embeddings
//! - TextExtractor: document text recovery
//! - Summarizer: extractive answer composition
//! - SessionLog: question/answer history
//!
//! Services receive these as `Arc<dyn ...>` so tests can swap in doubles.

pub mod embedding;
pub mod session_log;
pub mod summarizer;
pub mod text_extractor;
pub mod vector_search;

pub use embedding::Embedder;
pub use session_log::SessionLog;
pub use summarizer::Summarizer;
pub use text_extractor::TextExtractor;
pub use vector_search::VectorSearch;
