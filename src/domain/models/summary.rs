//! Summary and answer models

use serde::{Deserialize, Serialize};

use super::chunk::Chunk;

/// Returned when no sentence survives the noise filter
pub const NO_MEANINGFUL_SENTENCES: &str = "No meaningful sentences found in the retrieved chunks.";

/// Returned when the composed summary ends up empty
pub const NO_RELEVANT_SENTENCES: &str = "No relevant sentences found.";

/// Returned to callers when retrieval yields nothing
pub const NO_RELEVANT_INFORMATION: &str = "No relevant information found.";

/// Which summarizer composes answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStrategy {
    /// Rank sentences by embedding similarity to the query
    #[default]
    Semantic,

    /// Keep sentences sharing a word with the query; no embeddings
    Keyword,
}

impl std::fmt::Display for SummaryStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Semantic => write!(f, "semantic"),
            Self::Keyword => write!(f, "keyword"),
        }
    }
}

/// One question/answer exchange in the history log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Question as asked
    pub query: String,
    /// Answer as shown
    pub answer: String,
    /// Local time, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
}

impl SummaryRecord {
    /// Record stamped with the current local time
    pub fn now(query: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            answer: answer.into(),
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Answer handed to UI callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// The summary, or a fixed not-found message
    pub text: String,

    /// Present only when the caller asked for the supporting chunks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks: Option<Vec<Chunk>>,
}

impl Answer {
    /// The fixed answer used when nothing relevant was retrieved
    pub fn not_found(return_chunks: bool) -> Self {
        Self {
            text: NO_RELEVANT_INFORMATION.to_string(),
            chunks: return_chunks.then(Vec::new),
        }
    }
}
