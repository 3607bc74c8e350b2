//! docsift - offline question answering over a local PDF collection
//!
//! PDFs are extracted (text layer or OCR), cut into overlapping word windows
//! or paragraphs, embedded, and stored in a brute-force vector index on
//! disk. Questions are embedded the same way; the nearest chunks are
//! condensed into an extractive summary.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and port traits
//! - **Service Layer** (`services`): chunking, ingestion, retrieval, summarization
//! - **Adapters** (`adapters`): embedding providers
//! - **Infrastructure Layer** (`infrastructure`): config, logging, extraction,
//!   the vector index and the history file
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use docsift::infrastructure::config::ConfigLoader;
//! use docsift::infrastructure::vector::{load_index, IndexPaths};
//!
//! let config = ConfigLoader::load()?;
//! let index = load_index(&IndexPaths::from(&config.index))?;
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{Answer, Chunk, Config, DistanceMetric, SearchHit, SummaryRecord};
pub use domain::ports::{Embedder, SessionLog, Summarizer, TextExtractor, VectorSearch};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::vector::FlatIndex;
pub use services::{AnswerService, Chunker, IngestService, QuerySession, Retriever};
