//! Text chunking domain models
//!
//! Models for splitting extracted document text into retrievable chunks.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// How document text is cut into chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkingMode {
    /// Fixed windows of whitespace-delimited words with overlap
    #[default]
    Window,

    /// One chunk per blank-line separated paragraph
    Paragraph,
}

impl std::fmt::Display for ChunkingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Window => write!(f, "window"),
            Self::Paragraph => write!(f, "paragraph"),
        }
    }
}

impl std::str::FromStr for ChunkingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "window" => Ok(Self::Window),
            "paragraph" => Ok(Self::Paragraph),
            other => Err(format!("unknown chunking mode '{other}' (expected window or paragraph)")),
        }
    }
}

/// Configuration for document chunking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Chunking policy
    #[serde(default)]
    pub mode: ChunkingMode,

    /// Words per window
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Words shared by adjacent windows
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

const fn default_chunk_size() -> usize {
    500
}

const fn default_chunk_overlap() -> usize {
    50
}

impl Default for ChunkingConfig {
    /// 500-word windows with 50 words of overlap
    fn default() -> Self {
        Self {
            mode: ChunkingMode::Window,
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

impl ChunkingConfig {
    /// Window configuration with explicit size and overlap
    pub fn window(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            mode: ChunkingMode::Window,
            chunk_size,
            chunk_overlap,
        }
    }

    /// Paragraph configuration (size and overlap are unused but kept valid)
    pub fn paragraph() -> Self {
        Self {
            mode: ChunkingMode::Paragraph,
            ..Self::default()
        }
    }

    /// Validate the chunking configuration
    ///
    /// An overlap equal to or larger than the window would never advance the
    /// window start, so it is rejected outright.
    pub fn validate(&self) -> DomainResult<()> {
        if self.chunk_size == 0 {
            return Err(DomainError::Configuration(
                "chunk_size must be greater than 0".to_string(),
            ));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(DomainError::Configuration(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        Ok(())
    }

    /// Number of words the window start advances each step
    pub fn stride(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunking_config_default() {
        let config = ChunkingConfig::default();
        assert_eq!(config.mode, ChunkingMode::Window);
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.chunk_overlap, 50);
        assert_eq!(config.stride(), 450);
    }

    #[test]
    fn test_chunking_config_validation() {
        assert!(ChunkingConfig::default().validate().is_ok());

        let zero_size = ChunkingConfig::window(0, 0);
        assert!(matches!(
            zero_size.validate(),
            Err(DomainError::Configuration(_))
        ));

        let equal_overlap = ChunkingConfig::window(100, 100);
        assert!(matches!(
            equal_overlap.validate(),
            Err(DomainError::Configuration(_))
        ));

        let larger_overlap = ChunkingConfig::window(100, 150);
        assert!(larger_overlap.validate().is_err());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("window".parse::<ChunkingMode>().unwrap(), ChunkingMode::Window);
        assert_eq!("Paragraph".parse::<ChunkingMode>().unwrap(), ChunkingMode::Paragraph);
        assert!("sentences".parse::<ChunkingMode>().is_err());
    }

    #[test]
    fn test_mode_serde() {
        let config: ChunkingConfig =
            serde_yaml::from_str("mode: paragraph\nchunk_size: 200\n").unwrap();
        assert_eq!(config.mode, ChunkingMode::Paragraph);
        assert_eq!(config.chunk_size, 200);
        assert_eq!(config.chunk_overlap, 50);
    }
}
