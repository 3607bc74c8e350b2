//! Text extraction port.
//!
//! One interface over the ways a document's text can be recovered
//! (embedded text layer, OCR). The ingestion service picks one by
//! configuration and never cares which.

use async_trait::async_trait;
use std::path::Path;

use crate::domain::errors::DomainResult;

/// Turns one document into plain text
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Strategy name for logs.
    fn name(&self) -> &'static str;

    /// Extract the full text of one document.
    ///
    /// A failure here concerns this document only; callers log and move on.
    async fn extract(&self, path: &Path) -> DomainResult<String>;
}
