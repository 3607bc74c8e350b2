//! Layered configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid chunk_size: {0}. Must be at least 1")]
    InvalidChunkSize(usize),

    #[error("Invalid chunk_overlap: {overlap}. Must be less than chunk_size ({size})")]
    InvalidChunkOverlap { size: usize, overlap: usize },

    #[error("Invalid top_k: {0}. Must be at least 1")]
    InvalidTopK(usize),

    #[error("Invalid summary limit: {0}. max_sentences and max_chars must be at least 1")]
    InvalidSummaryLimit(String),

    #[error("Invalid embedding dimension: {0}. Must be at least 1")]
    InvalidDimension(usize),

    #[error("Invalid max_batch_size: {0}. Must be at least 1")]
    InvalidBatchSize(usize),

    #[error("Invalid max_distance: {0}. Must be a non-negative number")]
    InvalidMaxDistance(f32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("{0} path cannot be empty")]
    EmptyPath(&'static str),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .docsift/config.yaml (project config)
    /// 3. .docsift/local.yaml (local overrides, optional)
    /// 4. Environment variables (DOCSIFT_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".docsift/config.yaml"))
            .merge(Yaml::file(".docsift/local.yaml"))
            .merge(Env::prefixed("DOCSIFT_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file instead of `.docsift/`
    ///
    /// Environment variables still take precedence over the file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("DOCSIFT_").split("__"))
            .extract()
            .context(format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let chunking = &config.chunking;
        if chunking.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(chunking.chunk_size));
        }
        if chunking.chunk_overlap >= chunking.chunk_size {
            return Err(ConfigError::InvalidChunkOverlap {
                size: chunking.chunk_size,
                overlap: chunking.chunk_overlap,
            });
        }

        if config.retrieval.top_k == 0 {
            return Err(ConfigError::InvalidTopK(config.retrieval.top_k));
        }
        if let Some(max_distance) = config.retrieval.max_distance {
            if max_distance.is_nan() || max_distance < 0.0 {
                return Err(ConfigError::InvalidMaxDistance(max_distance));
            }
        }

        if config.summary.max_sentences == 0 {
            return Err(ConfigError::InvalidSummaryLimit("max_sentences = 0".to_string()));
        }
        if config.summary.max_chars == 0 {
            return Err(ConfigError::InvalidSummaryLimit("max_chars = 0".to_string()));
        }

        if config.embedding.dimension == 0 {
            return Err(ConfigError::InvalidDimension(config.embedding.dimension));
        }
        if config.embedding.max_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(config.embedding.max_batch_size));
        }

        if config.index.path.is_empty() {
            return Err(ConfigError::EmptyPath("index"));
        }
        if config.index.metadata_path.is_empty() {
            return Err(ConfigError::EmptyPath("index metadata"));
        }
        if config.history.path.is_empty() {
            return Err(ConfigError::EmptyPath("history"));
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        ChunkingMode, DistanceMetric, EmbeddingProviderKind, ExtractionStrategy, SummaryStrategy,
    };
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.corpus.pdf_dir, "data/policies");
        assert_eq!(config.chunking.chunk_size, 500);
        assert_eq!(config.chunking.chunk_overlap, 50);
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.retrieval.max_distance, None);
        assert_eq!(config.summary.max_sentences, 5);
        assert_eq!(config.summary.max_chars, 800);
        assert_eq!(config.summary.min_words, 6);
        assert_eq!(config.history.path, "qa_history.txt");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.embedding.provider, EmbeddingProviderKind::Local);
        assert_eq!(config.embedding.model, "all-MiniLM-L6-v2");
        assert_eq!(config.embedding.dimension, 384);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
corpus:
  pdf_dir: /srv/policies
extraction:
  strategy: ocr
  ocr:
    tesseract_path: /opt/tesseract
    dpi: 300
chunking:
  mode: paragraph
  chunk_size: 200
  chunk_overlap: 20
embedding:
  provider: openai
  dimension: 1536
index:
  metric: cosine
summary:
  strategy: keyword
logging:
  level: debug
  format: json
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.corpus.pdf_dir, "/srv/policies");
        assert_eq!(config.extraction.strategy, ExtractionStrategy::Ocr);
        assert_eq!(config.extraction.ocr.tesseract_path.as_deref(), Some("/opt/tesseract"));
        assert_eq!(config.extraction.ocr.dpi, 300);
        assert_eq!(config.extraction.ocr.language, "eng");
        assert_eq!(config.chunking.mode, ChunkingMode::Paragraph);
        assert_eq!(config.chunking.chunk_size, 200);
        assert_eq!(config.embedding.provider, EmbeddingProviderKind::Openai);
        assert_eq!(config.embedding.dimension, 1536);
        assert_eq!(config.embedding.max_batch_size, 64);
        assert_eq!(config.index.metric, DistanceMetric::Cosine);
        assert_eq!(config.summary.strategy, SummaryStrategy::Keyword);
        assert_eq!(config.logging.format, "json");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_local_provider_parsing() {
        let yaml = "embedding:\n  provider: local\n  model: bge-small-en-v1.5\n  cache_dir: /var/cache/docsift\n";
        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.embedding.provider, EmbeddingProviderKind::Local);
        assert_eq!(config.embedding.model, "bge-small-en-v1.5");
        assert_eq!(config.embedding.cache_dir.as_deref(), Some("/var/cache/docsift"));
        assert_eq!(config.embedding.dimension, 384);

        let hashing: Config = serde_yaml::from_str("embedding:\n  provider: hashing\n").unwrap();
        assert_eq!(hashing.embedding.provider, EmbeddingProviderKind::Hashing);
    }

    #[test]
    fn test_validate_chunk_bounds() {
        let mut config = Config::default();
        config.chunking.chunk_size = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidChunkSize(0))
        ));

        config.chunking.chunk_size = 50;
        config.chunking.chunk_overlap = 50;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidChunkOverlap {
                size: 50,
                overlap: 50
            })
        ));
    }

    #[test]
    fn test_validate_retrieval_and_summary() {
        let mut config = Config::default();
        config.retrieval.top_k = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTopK(0))
        ));

        let mut config = Config::default();
        config.retrieval.max_distance = Some(-1.0);
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxDistance(_))
        ));

        let mut config = Config::default();
        config.summary.max_chars = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidSummaryLimit(_))
        ));
    }

    #[test]
    fn test_validate_embedding_and_paths() {
        let mut config = Config::default();
        config.embedding.dimension = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidDimension(0))
        ));

        let mut config = Config::default();
        config.index.metadata_path = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyPath("index metadata"))
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogFormat(format)) => assert_eq!(format, "xml"),
            other => panic!("Expected InvalidLogFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file_merges_over_defaults() {
        let file = yaml_file("chunking:\n  chunk_size: 120\nretrieval:\n  top_k: 5\n");

        let config = temp_env::with_vars_unset(
            ["DOCSIFT_CHUNKING__CHUNK_SIZE", "DOCSIFT_RETRIEVAL__TOP_K"],
            || ConfigLoader::load_from_file(file.path()).unwrap(),
        );

        assert_eq!(config.chunking.chunk_size, 120);
        assert_eq!(config.chunking.chunk_overlap, 50, "default survives");
        assert_eq!(config.retrieval.top_k, 5);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = yaml_file("chunking:\n  chunk_size: 120\nlogging:\n  level: info\n");

        let config = temp_env::with_vars(
            [
                ("DOCSIFT_CHUNKING__CHUNK_SIZE", Some("300")),
                ("DOCSIFT_SUMMARY__STRATEGY", Some("keyword")),
            ],
            || ConfigLoader::load_from_file(file.path()).unwrap(),
        );

        assert_eq!(config.chunking.chunk_size, 300, "env should win");
        assert_eq!(config.summary.strategy, SummaryStrategy::Keyword);
        assert_eq!(config.logging.level, "info", "file value persists");
    }

    #[test]
    fn test_load_from_file_rejects_invalid() {
        let file = yaml_file("chunking:\n  chunk_size: 10\n  chunk_overlap: 10\n");
        let result = temp_env::with_vars_unset(["DOCSIFT_CHUNKING__CHUNK_SIZE"], || {
            ConfigLoader::load_from_file(file.path())
        });
        assert!(result.is_err());

        assert!(ConfigLoader::load_from_file("/nonexistent/docsift.yaml").is_err());
    }

    #[test]
    fn test_hierarchical_merging() {
        let base_file = yaml_file("retrieval:\n  top_k: 4\nlogging:\n  level: info\n  format: json\n");
        let override_file = yaml_file("retrieval:\n  top_k: 8\nlogging:\n  level: debug\n");

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.retrieval.top_k, 8, "Override should win");
        assert_eq!(
            config.logging.level, "debug",
            "Override should win for nested fields"
        );
        assert_eq!(
            config.logging.format, "json",
            "Base value should persist when not overridden"
        );
    }
}
