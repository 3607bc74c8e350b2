//! Domain models

pub mod chunk;
pub mod chunking;
pub mod config;
pub mod search;
pub mod summary;

pub use chunk::{Chunk, ChunkRecord};
pub use chunking::{ChunkingConfig, ChunkingMode};
pub use config::{
    Config, CorpusConfig, EmbeddingConfig, EmbeddingProviderKind, ExtractionConfig,
    ExtractionStrategy, HistoryConfig, IndexConfig, LoggingConfig, OcrConfig, RetrievalConfig,
    SummaryConfig,
};
pub use search::{cosine_similarity, DistanceMetric, SearchHit};
pub use summary::{
    Answer, SummaryRecord, SummaryStrategy, NO_MEANINGFUL_SENTENCES, NO_RELEVANT_INFORMATION,
    NO_RELEVANT_SENTENCES,
};
