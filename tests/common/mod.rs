//! Common test utilities for integration tests
//!
//! Provides a tiny two-document corpus and a plain-text extractor so the
//! pipeline can run without real PDFs.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use docsift::adapters::embeddings::HashingEmbedder;
use docsift::domain::models::{ChunkingConfig, DistanceMetric};
use docsift::services::{Chunker, IngestService};
use docsift::{DomainResult, FlatIndex, TextExtractor};

pub const TOLL_POLICY: &str = "Toll exemption policy: vehicles used by ambulances and fire \
    services are exempt from toll charges on national highways. Applications for a toll \
    exemption card are processed by the regional transport office within ten days.";

pub const SPEED_POLICY: &str = "Speed limits on national highways are 100 km per hour for \
    cars and 80 for trucks. Cameras record every vehicle that crosses the limit at night.";

/// Reads `.pdf` files as UTF-8 text
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "plain"
    }

    async fn extract(&self, path: &Path) -> DomainResult<String> {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Directory holding the toll and speed documents
pub fn policy_corpus() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("speed_policy.pdf"), SPEED_POLICY).expect("write speed");
    std::fs::write(dir.path().join("toll_policy.pdf"), TOLL_POLICY).expect("write toll");
    dir
}

pub fn embedder() -> Arc<HashingEmbedder> {
    Arc::new(HashingEmbedder::new(384).expect("valid dimension"))
}

/// Ingest `dir` with the hashing embedder and the given metric
pub async fn ingest(dir: &Path, metric: DistanceMetric) -> FlatIndex {
    let service = IngestService::new(
        Arc::new(PlainTextExtractor),
        Chunker::with_config(ChunkingConfig::default()).expect("valid chunking"),
        embedder(),
        metric,
    );
    let (index, _report) = service.ingest_dir(dir, |_| {}).await.expect("ingest");
    index
}

/// Initialize tracing for test output
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
