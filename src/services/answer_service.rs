//! One-shot question answering for UI callers.

use std::sync::Arc;

use crate::domain::models::Answer;
use crate::domain::ports::Summarizer;
use crate::services::retriever::Retriever;

/// Retrieve then summarize, never failing outward
pub struct AnswerService {
    retriever: Retriever,
    summarizer: Arc<dyn Summarizer>,
    top_k: usize,
}

impl AnswerService {
    /// Service retrieving `top_k` chunks per question
    pub fn new(retriever: Retriever, summarizer: Arc<dyn Summarizer>, top_k: usize) -> Self {
        Self {
            retriever,
            summarizer,
            top_k,
        }
    }

    /// Answer `question` from the indexed corpus
    ///
    /// Empty or failed retrieval gives "No relevant information found." When
    /// `return_chunks` is set the supporting chunks ride along, best first.
    pub async fn generate_answer(&self, question: &str, return_chunks: bool) -> Answer {
        let chunks = match self.retriever.retrieve(question, self.top_k).await {
            Ok(chunks) if !chunks.is_empty() => chunks,
            Ok(_) => return Answer::not_found(return_chunks),
            Err(err) => {
                tracing::warn!(error = %err, "retrieval failed");
                return Answer::not_found(return_chunks);
            }
        };

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let text = match self.summarizer.summarize(question, &texts).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    strategy = %self.summarizer.strategy(),
                    "summarization failed"
                );
                return Answer::not_found(return_chunks);
            }
        };

        Answer {
            text,
            chunks: return_chunks.then_some(chunks),
        }
    }
}
