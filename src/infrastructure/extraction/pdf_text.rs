//! Embedded text-layer extraction via `pdf-extract`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::TextExtractor;

/// Reads the text layer of born-digital PDFs
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Extractor for PDFs with a text layer
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    fn name(&self) -> &'static str {
        "text"
    }

    async fn extract(&self, path: &Path) -> DomainResult<String> {
        let owned: PathBuf = path.to_path_buf();

        // pdf-extract is blocking and panics on some malformed files; the
        // join error catches the panic.
        let result = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
            .await
            .map_err(|e| DomainError::Extraction {
                path: path.to_path_buf(),
                reason: format!("extractor panicked: {e}"),
            })?;

        let text = result.map_err(|e| DomainError::Extraction {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), chars = text.len(), "extracted text layer");
        Ok(text)
    }
}
