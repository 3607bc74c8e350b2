//! Ingest command: build the index from a directory of PDFs.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::adapters::embeddings::build_embedder;
use crate::cli::output::{create_progress_bar, output, CommandOutput};
use crate::domain::models::{ChunkingMode, Config, ExtractionStrategy};
use crate::infrastructure::extraction::build_extractor;
use crate::infrastructure::vector::{save_index, IndexPaths};
use crate::services::{Chunker, IngestEvent, IngestReport, IngestService};

/// Arguments for `docsift ingest`
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Directory of PDFs (defaults to corpus.pdf_dir)
    #[arg(long, value_name = "DIR")]
    pub pdf_dir: Option<PathBuf>,

    /// Extraction strategy: text or ocr
    #[arg(long)]
    pub strategy: Option<ExtractionStrategy>,

    /// Chunking mode: window or paragraph
    #[arg(long)]
    pub mode: Option<ChunkingMode>,
}

/// Result of `docsift ingest`
#[derive(Debug, Serialize)]
pub struct IngestOutput {
    /// What the run indexed and skipped
    #[serde(flatten)]
    pub report: IngestReport,
    /// Where the vectors were written
    pub index_path: String,
    /// Where the chunk metadata was written
    pub metadata_path: String,
}

impl CommandOutput for IngestOutput {
    fn to_human(&self) -> String {
        let report = &self.report;
        let mut lines = vec![format!(
            "Indexed {} chunks from {} of {} PDF(s) ({} extraction, {} embeddings, dimension {})",
            report.chunks,
            report.documents_indexed,
            report.documents_found,
            report.extractor,
            report.embedder,
            report.dimension
        )];

        if !report.skipped.is_empty() {
            lines.push(format!("Skipped {} document(s):", report.skipped.len()));
            for skipped in &report.skipped {
                lines.push(format!("  {}: {}", skipped.source, skipped.reason));
            }
        }

        lines.push(format!("Index saved to {}", self.index_path));
        lines.push(format!("Metadata saved to {}", self.metadata_path));
        lines.join("\n")
    }
}

/// Apply command-line overrides on top of the loaded configuration
fn apply_overrides(args: &IngestArgs, config: &Config) -> Config {
    let mut config = config.clone();
    if let Some(dir) = &args.pdf_dir {
        config.corpus.pdf_dir = dir.display().to_string();
    }
    if let Some(strategy) = args.strategy {
        config.extraction.strategy = strategy;
    }
    if let Some(mode) = args.mode {
        config.chunking.mode = mode;
    }
    config
}

/// Build the index from the configured PDF directory and save it
pub async fn execute(args: IngestArgs, config: &Config, json_mode: bool) -> Result<()> {
    let config = apply_overrides(&args, config);
    let pdf_dir = PathBuf::from(&config.corpus.pdf_dir);

    let extractor =
        build_extractor(&config.extraction).context("Failed to set up text extraction")?;
    let chunker = Chunker::with_config(config.chunking.clone()).context("Invalid chunking")?;
    let embedder = build_embedder(&config.embedding).context("Failed to set up embedder")?;
    let service = IngestService::new(extractor, chunker, embedder, config.index.metric);

    let documents = IngestService::list_documents(&pdf_dir)?;
    if documents.is_empty() {
        tracing::warn!(dir = %pdf_dir.display(), "no PDF files found");
    }

    let pb = create_progress_bar(documents.len() as u64, !json_mode);
    let (index, report) = service
        .ingest_documents(&documents, |event| match event {
            IngestEvent::Document { position, path, .. } => {
                pb.set_position(position as u64);
                pb.set_message(
                    path.file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                );
            }
            IngestEvent::Embedding { chunks } => {
                pb.set_position(documents.len() as u64);
                pb.set_message(format!("embedding {chunks} chunks"));
            }
        })
        .await
        .context("Ingestion failed")?;
    pb.finish_and_clear();

    let paths = IndexPaths::from(&config.index);
    save_index(&index, &paths).context("Failed to save index")?;

    let result = IngestOutput {
        report,
        index_path: paths.index.display().to_string(),
        metadata_path: paths.metadata.display().to_string(),
    };
    output(&result, json_mode);

    Ok(())
}
