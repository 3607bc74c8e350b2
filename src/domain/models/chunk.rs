//! Chunk models shared by ingestion, the index and retrieval.

use serde::{Deserialize, Serialize};

/// A retrievable span of document text
///
/// `id` is the chunk's position in the corpus and doubles as the row of its
/// vector in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Corpus position; the vector row in the index
    pub id: usize,
    /// Chunk text as extracted
    pub text: String,
    /// File name of the originating document
    pub source: String,
}

impl Chunk {
    /// Chunk `id` of `source`
    pub fn new(id: usize, text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            source: source.into(),
        }
    }

    /// First `max_chars` characters of the text
    pub fn preview(&self, max_chars: usize) -> String {
        self.text.chars().take(max_chars).collect()
    }

    /// Metadata row as written to disk
    pub fn to_record(&self) -> ChunkRecord {
        ChunkRecord {
            source: self.source.clone(),
            text: self.text.clone(),
        }
    }
}

/// On-disk metadata row, aligned 1:1 with index vectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Originating document
    pub source: String,
    /// Chunk text
    pub text: String,
}

impl ChunkRecord {
    /// Rebuild the chunk that sits at `position` in the index
    pub fn into_chunk(self, position: usize) -> Chunk {
        Chunk {
            id: position,
            text: self.text,
            source: self.source,
        }
    }
}
