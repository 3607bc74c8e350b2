//! Application services
//!
//! The retrieval engine proper: chunking, ingestion, retrieval,
//! summarization, and the two query front-ends (one-shot answers and the
//! interactive loop). Services depend only on domain ports.

pub mod answer_service;
pub mod chunker;
pub mod ingest_service;
pub mod query_session;
pub mod retriever;
pub mod summarizer;

pub use answer_service::AnswerService;
pub use chunker::{chunk_paragraphs, chunk_words, Chunker};
pub use ingest_service::{IngestEvent, IngestReport, IngestService, SkippedDocument};
pub use query_session::{QuerySession, SessionOptions, SessionStats};
pub use retriever::Retriever;
pub use summarizer::{split_sentences, KeywordSummarizer, SemanticSummarizer};

use std::sync::Arc;

use crate::domain::models::{SummaryConfig, SummaryStrategy};
use crate::domain::ports::{Embedder, Summarizer};

/// Build the summarizer selected by `config.strategy`
pub fn build_summarizer(config: &SummaryConfig, embedder: Arc<dyn Embedder>) -> Arc<dyn Summarizer> {
    match config.strategy {
        SummaryStrategy::Semantic => Arc::new(SemanticSummarizer::new(embedder, config.clone())),
        SummaryStrategy::Keyword => Arc::new(KeywordSummarizer::new()),
    }
}
