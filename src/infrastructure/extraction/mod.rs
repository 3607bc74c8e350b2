//! Text extraction adapters
//!
//! `text` reads the PDF's embedded text layer; `ocr` rasterizes and runs
//! tesseract for scanned documents.

pub mod ocr;
pub mod pdf_text;

use std::sync::Arc;

pub use ocr::{locate_binary, OcrExtractor};
pub use pdf_text::PdfTextExtractor;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ExtractionConfig, ExtractionStrategy};
use crate::domain::ports::TextExtractor;

/// Build the extractor selected by `config.strategy`
pub fn build_extractor(config: &ExtractionConfig) -> DomainResult<Arc<dyn TextExtractor>> {
    Ok(match config.strategy {
        ExtractionStrategy::Text => Arc::new(PdfTextExtractor::new()),
        ExtractionStrategy::Ocr => Arc::new(OcrExtractor::from_config(&config.ocr)?),
    })
}
