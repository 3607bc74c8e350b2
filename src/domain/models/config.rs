//! Configuration sections, one struct per top-level key.

use serde::{Deserialize, Serialize};

use super::chunking::ChunkingConfig;
use super::search::DistanceMetric;
use super::summary::SummaryStrategy;

/// Main configuration structure for docsift
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Where the source documents live
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Text extraction strategy
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Chunking policy
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Embedding provider
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Index files and distance metric
    #[serde(default)]
    pub index: IndexConfig,

    /// Query-time retrieval
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Answer composition
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Question/answer history log
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Corpus configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CorpusConfig {
    /// Directory scanned for `.pdf` files
    #[serde(default = "default_pdf_dir")]
    pub pdf_dir: String,
}

fn default_pdf_dir() -> String {
    "data/policies".to_string()
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            pdf_dir: default_pdf_dir(),
        }
    }
}

/// How text is pulled out of a PDF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Embedded text layer
    #[default]
    Text,

    /// Rasterize pages and run OCR (scanned documents)
    Ocr,
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Ocr => write!(f, "ocr"),
        }
    }
}

impl std::str::FromStr for ExtractionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "ocr" => Ok(Self::Ocr),
            other => Err(format!("unknown extraction strategy '{other}' (expected text or ocr)")),
        }
    }
}

/// Text extraction configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExtractionConfig {
    /// Text layer or OCR
    #[serde(default)]
    pub strategy: ExtractionStrategy,

    /// External OCR tool settings
    #[serde(default)]
    pub ocr: OcrConfig,
}

/// OCR tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OcrConfig {
    /// Explicit path to `tesseract`; searched for when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tesseract_path: Option<String>,

    /// Explicit path to `pdftoppm`; searched for when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdftoppm_path: Option<String>,

    /// Tesseract language code
    #[serde(default = "default_ocr_language")]
    pub language: String,

    /// Rasterization resolution
    #[serde(default = "default_ocr_dpi")]
    pub dpi: u32,
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

const fn default_ocr_dpi() -> u32 {
    200
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: None,
            pdftoppm_path: None,
            language: default_ocr_language(),
            dpi: default_ocr_dpi(),
        }
    }
}

/// Embedding backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderKind {
    /// In-process sentence-transformer model (fastembed)
    #[default]
    Local,

    /// Offline feature-hashing embedder; deterministic, no model files
    Hashing,

    /// OpenAI-compatible `/embeddings` endpoint
    Openai,
}

impl std::fmt::Display for EmbeddingProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Hashing => write!(f, "hashing"),
            Self::Openai => write!(f, "openai"),
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmbeddingConfig {
    /// Which embedder to build
    #[serde(default)]
    pub provider: EmbeddingProviderKind,

    /// Model run by the local provider, or sent to the HTTP provider
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Output dimension
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,

    /// Base URL for the HTTP provider
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,

    /// Where the local provider keeps downloaded models (fastembed's
    /// default cache when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<String>,

    /// API key (falls back to OPENAI_API_KEY)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_embedding_timeout")]
    pub timeout_secs: u64,

    /// Texts per HTTP request
    #[serde(default = "default_embedding_batch_size")]
    pub max_batch_size: usize,

    /// Retries for transient HTTP failures
    #[serde(default = "default_embedding_retries")]
    pub max_retries: u32,

    /// First retry delay; doubles per attempt
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_embedding_model() -> String {
    "all-MiniLM-L6-v2".to_string()
}

const fn default_embedding_dimension() -> usize {
    384
}

fn default_embedding_base_url() -> String {
    "http://localhost:8080/v1".to_string()
}

const fn default_embedding_timeout() -> u64 {
    30
}

const fn default_embedding_batch_size() -> usize {
    64
}

const fn default_embedding_retries() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::default(),
            model: default_embedding_model(),
            dimension: default_embedding_dimension(),
            base_url: default_embedding_base_url(),
            cache_dir: None,
            api_key: None,
            timeout_secs: default_embedding_timeout(),
            max_batch_size: default_embedding_batch_size(),
            max_retries: default_embedding_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Index file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IndexConfig {
    /// Vector file
    #[serde(default = "default_index_path")]
    pub path: String,

    /// Metadata file (JSON array of `{source, text}`)
    #[serde(default = "default_metadata_path")]
    pub metadata_path: String,

    /// Distance used for ranking
    #[serde(default)]
    pub metric: DistanceMetric,
}

fn default_index_path() -> String {
    ".docsift/index.bin".to_string()
}

fn default_metadata_path() -> String {
    ".docsift/metadata.json".to_string()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: default_index_path(),
            metadata_path: default_metadata_path(),
            metric: DistanceMetric::default(),
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetrievalConfig {
    /// Chunks returned per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Hits farther than this are dropped; no floor when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f32>,

    /// Characters shown per chunk in the interactive loop
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

const fn default_top_k() -> usize {
    3
}

const fn default_preview_chars() -> usize {
    500
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            max_distance: None,
            preview_chars: default_preview_chars(),
        }
    }
}

/// Summary configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SummaryConfig {
    /// Semantic or keyword
    #[serde(default)]
    pub strategy: SummaryStrategy,

    /// Most sentences in a semantic summary
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,

    /// Most characters in a semantic summary
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Sentences with fewer words are treated as noise
    #[serde(default = "default_min_words")]
    pub min_words: usize,
}

const fn default_max_sentences() -> usize {
    5
}

const fn default_max_chars() -> usize {
    800
}

const fn default_min_words() -> usize {
    6
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            strategy: SummaryStrategy::default(),
            max_sentences: default_max_sentences(),
            max_chars: default_max_chars(),
            min_words: default_min_words(),
        }
    }
}

/// History log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HistoryConfig {
    /// File every answered question is appended to
    #[serde(default = "default_history_path")]
    pub path: String,
}

fn default_history_path() -> String {
    "qa_history.txt".to_string()
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,

    /// Rotation for file output: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
