//! OpenAI-compatible embedding provider adapter.
//!
//! Talks to any server exposing the `/embeddings` endpoint (OpenAI, Azure
//! OpenAI, or a local sentence-transformers server). Texts are sent in
//! batches of `max_batch_size`; transient failures (429, 5xx, network) are
//! retried with exponential backoff.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::EmbeddingConfig;
use crate::domain::ports::Embedder;

/// Embedder backed by an HTTP embeddings endpoint
pub struct OpenAiEmbedder {
    config: EmbeddingConfig,
    client: reqwest::Client,
}

/// Outcome of a single failed request
enum CallError {
    Transient(String),
    Permanent(DomainError),
}

impl OpenAiEmbedder {
    /// Build the HTTP client; no request is made yet
    pub fn new(config: EmbeddingConfig) -> DomainResult<Self> {
        if config.max_batch_size == 0 {
            return Err(DomainError::Configuration(
                "embedding.max_batch_size must be greater than 0".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::Embedding(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Configured key, else `OPENAI_API_KEY`; local servers need neither
    fn api_key(&self) -> Option<String> {
        self.config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|key| !key.is_empty())
    }

    async fn call_with_retry(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        let mut attempt = 0u32;
        let mut backoff = Duration::from_millis(self.config.retry_backoff_ms);

        loop {
            match self.call_embeddings_api(texts).await {
                Ok(vectors) => return Ok(vectors),
                Err(CallError::Permanent(err)) => return Err(err),
                Err(CallError::Transient(reason)) if attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        max_retries = self.config.max_retries,
                        backoff_ms = backoff.as_millis() as u64,
                        %reason,
                        "embedding request failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
                Err(CallError::Transient(reason)) => {
                    return Err(DomainError::Embedding(format!(
                        "giving up after {} retries: {reason}",
                        self.config.max_retries
                    )));
                }
            }
        }
    }

    async fn call_embeddings_api(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, CallError> {
        let url = format!("{}/embeddings", self.config.base_url.trim_end_matches('/'));

        let request_body = EmbeddingsRequest {
            model: &self.config.model,
            input: texts,
        };

        let mut request = self.client.post(&url).json(&request_body);
        if let Some(key) = self.api_key() {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CallError::Transient(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            let message = format!("embedding API returned {status}: {body}");

            return Err(if status.as_u16() == 429 || status.is_server_error() {
                CallError::Transient(message)
            } else {
                CallError::Permanent(DomainError::Embedding(message))
            });
        }

        let result: EmbeddingsResponse = response.json().await.map_err(|e| {
            CallError::Permanent(DomainError::Serialization(format!(
                "failed to parse embedding response: {e}"
            )))
        })?;

        if result.data.len() != texts.len() {
            return Err(CallError::Permanent(DomainError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                result.data.len()
            ))));
        }

        // Sort by index to maintain input order
        let mut data = result.data;
        data.sort_by_key(|d| d.index);

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());

        for (batch_index, batch) in texts.chunks(self.config.max_batch_size).enumerate() {
            let offset = batch_index * self.config.max_batch_size;
            let embedded = self.call_with_retry(batch).await?;

            for (i, vector) in embedded.iter().enumerate() {
                if vector.len() != self.config.dimension {
                    return Err(DomainError::DimensionMismatch {
                        expected: self.config.dimension,
                        found: vector.len(),
                        position: offset + i,
                    });
                }
            }

            tracing::debug!(batch = batch_index, size = batch.len(), "embedded batch");
            vectors.extend(embedded);
        }

        Ok(vectors)
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
