//! Text chunking
//!
//! Splits extracted document text into overlapping word windows or into
//! paragraphs, depending on the configured [`ChunkingMode`].

use crate::domain::errors::DomainResult;
use crate::domain::models::{Chunk, ChunkingConfig, ChunkingMode};

/// Splits text into chunks according to a validated [`ChunkingConfig`]
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    /// Chunker with the default 500/50 word windows
    pub fn new() -> Self {
        Self {
            config: ChunkingConfig::default(),
        }
    }

    /// Create a chunker with custom configuration
    pub fn with_config(config: ChunkingConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active chunking settings
    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Chunk text with the configured policy, dropping blank pieces
    pub fn chunk(&self, text: &str) -> Vec<String> {
        match self.config.mode {
            ChunkingMode::Window => {
                word_windows(text, self.config.chunk_size, self.config.stride())
            }
            ChunkingMode::Paragraph => chunk_paragraphs(text),
        }
    }

    /// Chunk one document and attach its source
    ///
    /// Ids are assigned consecutively from `first_id`, the corpus position of
    /// the document's first chunk.
    pub fn chunk_document(&self, source: &str, text: &str, first_id: usize) -> Vec<Chunk> {
        self.chunk(text)
            .into_iter()
            .enumerate()
            .map(|(offset, piece)| Chunk::new(first_id + offset, piece, source))
            .collect()
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new()
    }
}

/// Split text into windows of `size` words, each starting `size - overlap`
/// words after the previous one.
///
/// The last window runs to the end of the text and may be shorter. Fails
/// when `size` is zero or `overlap >= size`.
pub fn chunk_words(text: &str, size: usize, overlap: usize) -> DomainResult<Vec<String>> {
    let config = ChunkingConfig::window(size, overlap);
    config.validate()?;
    Ok(word_windows(text, size, config.stride()))
}

fn word_windows(text: &str, size: usize, stride: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < words.len() {
        let end = (start + size).min(words.len());
        chunks.push(words[start..end].join(" "));

        if end >= words.len() {
            break;
        }
        start += stride;
    }

    chunks
}

/// Split text on `"\n\n"`; each piece becomes one chunk, verbatim
///
/// Only `\r\n` is normalized first. Pieces that are whitespace-only are
/// dropped, everything else keeps its surrounding whitespace, so a run of
/// three newlines leaves a leading `\n` on the next paragraph.
pub fn chunk_paragraphs(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .filter(|piece| !piece.trim().is_empty())
        .map(str::to_string)
        .collect()
}
