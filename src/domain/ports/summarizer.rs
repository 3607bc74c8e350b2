//! Extractive summarizer port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::SummaryStrategy;

/// Composes an answer from existing sentences of the retrieved chunks.
#[async_trait]
pub trait Summarizer: Send + Sync {
    fn strategy(&self) -> SummaryStrategy;

    async fn summarize(&self, query: &str, chunks: &[String]) -> DomainResult<String>;
}
