//! Corpus ingestion
//!
//! Turns a directory of PDFs into a [`FlatIndex`]: extract every document,
//! chunk it, embed all chunks, build the index. A document that fails to
//! extract or yields no text is logged and skipped; embedding and index
//! build failures abort the run.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Chunk, DistanceMetric};
use crate::domain::ports::{Embedder, TextExtractor, VectorSearch};
use crate::infrastructure::vector::FlatIndex;
use crate::services::chunker::Chunker;

/// Progress notifications for a UI
#[derive(Debug, Clone, Copy)]
pub enum IngestEvent<'a> {
    /// About to extract document `position` of `total`
    Document {
        position: usize,
        total: usize,
        path: &'a Path,
    },
    /// Extraction done; embedding `chunks` chunks
    Embedding { chunks: usize },
}

/// A document left out of the index
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDocument {
    /// File name of the document
    pub source: String,
    /// Why it was skipped
    pub reason: String,
}

/// Outcome of one ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// PDFs found in the directory
    pub documents_found: usize,
    /// PDFs that contributed chunks
    pub documents_indexed: usize,
    /// PDFs left out, with reasons
    pub skipped: Vec<SkippedDocument>,
    /// Chunks in the index
    pub chunks: usize,
    /// Vector width
    pub dimension: usize,
    /// Extractor name
    pub extractor: String,
    /// Embedder name
    pub embedder: String,
}

/// Extract, chunk and embed a corpus
pub struct IngestService {
    extractor: Arc<dyn TextExtractor>,
    chunker: Chunker,
    embedder: Arc<dyn Embedder>,
    metric: DistanceMetric,
}

impl IngestService {
    /// Service wiring the given extractor, chunker and embedder
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        chunker: Chunker,
        embedder: Arc<dyn Embedder>,
        metric: DistanceMetric,
    ) -> Self {
        Self {
            extractor,
            chunker,
            embedder,
            metric,
        }
    }

    /// `.pdf` files (any case) directly inside `dir`, sorted by name
    pub fn list_documents(dir: &Path) -> DomainResult<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(DomainError::Configuration(format!(
                "PDF directory not found: {}",
                dir.display()
            )));
        }

        let mut documents: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_pdf(path))
            .collect();
        documents.sort();

        Ok(documents)
    }

    /// Ingest every PDF in `dir`
    pub async fn ingest_dir<F>(
        &self,
        dir: &Path,
        on_event: F,
    ) -> DomainResult<(FlatIndex, IngestReport)>
    where
        F: FnMut(IngestEvent<'_>),
    {
        let documents = Self::list_documents(dir)?;
        self.ingest_documents(&documents, on_event).await
    }

    /// Ingest the given documents in order
    pub async fn ingest_documents<F>(
        &self,
        documents: &[PathBuf],
        mut on_event: F,
    ) -> DomainResult<(FlatIndex, IngestReport)>
    where
        F: FnMut(IngestEvent<'_>),
    {
        let mut chunks: Vec<Chunk> = Vec::new();
        let mut skipped = Vec::new();
        let mut indexed = 0;

        for (position, path) in documents.iter().enumerate() {
            on_event(IngestEvent::Document {
                position,
                total: documents.len(),
                path,
            });

            let source = source_name(path);
            let text = match self.extractor.extract(path).await {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(source = %source, error = %err, "skipping document");
                    skipped.push(SkippedDocument {
                        source,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            if text.trim().is_empty() {
                tracing::warn!(source = %source, "no text extracted");
                skipped.push(SkippedDocument {
                    source,
                    reason: "no text extracted".to_string(),
                });
                continue;
            }

            let document_chunks = self.chunker.chunk_document(&source, &text, chunks.len());
            tracing::info!(source = %source, chunks = document_chunks.len(), "chunked document");
            chunks.extend(document_chunks);
            indexed += 1;
        }

        on_event(IngestEvent::Embedding {
            chunks: chunks.len(),
        });

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = if texts.is_empty() {
            Vec::new()
        } else {
            self.embedder.embed_batch(&texts).await?
        };
        if vectors.len() != texts.len() {
            return Err(DomainError::Embedding(format!(
                "expected {} chunk embeddings, got {}",
                texts.len(),
                vectors.len()
            )));
        }

        let index = FlatIndex::build(vectors, chunks, self.metric)?;
        let report = IngestReport {
            documents_found: documents.len(),
            documents_indexed: indexed,
            skipped,
            chunks: index.chunks().len(),
            dimension: index.dimension(),
            extractor: self.extractor.name().to_string(),
            embedder: self.embedder.name().to_string(),
        };

        tracing::info!(
            documents = report.documents_indexed,
            skipped = report.skipped.len(),
            chunks = report.chunks,
            "ingestion complete"
        );

        Ok((index, report))
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// File name recorded as the chunk source
fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
