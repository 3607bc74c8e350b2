//! Infrastructure layer module
//!
//! Concrete implementations behind the domain ports plus process-wide setup:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - PDF text extraction and OCR
//! - The flat vector index and its on-disk format
//! - The question/answer history file

pub mod config;
pub mod extraction;
pub mod history;
pub mod logging;
pub mod vector;
