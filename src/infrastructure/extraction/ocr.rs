//! OCR extraction for scanned PDFs.
//!
//! Pages are rasterized with `pdftoppm` (poppler) into a scratch directory
//! and each image is read back with `tesseract`. A page that fails OCR is
//! logged and skipped; the document fails only if rasterization does.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::OcrConfig;
use crate::domain::ports::TextExtractor;

/// Install locations checked after `PATH`
const WELL_KNOWN_DIRS: &[&str] = &[
    "/usr/bin",
    "/usr/local/bin",
    "/opt/homebrew/bin",
    r"C:\Program Files\Tesseract-OCR",
    r"C:\Program Files\poppler\bin",
];

/// Rasterize-then-recognize extractor
#[derive(Debug, Clone)]
pub struct OcrExtractor {
    tesseract: PathBuf,
    pdftoppm: PathBuf,
    language: String,
    dpi: u32,
}

impl OcrExtractor {
    /// Resolve both binaries up front so a missing install fails before
    /// any document is touched.
    pub fn from_config(config: &OcrConfig) -> DomainResult<Self> {
        let dirs = search_dirs();
        let tesseract = locate_binary("tesseract", config.tesseract_path.as_deref(), &dirs)?;
        let pdftoppm = locate_binary("pdftoppm", config.pdftoppm_path.as_deref(), &dirs)?;

        tracing::debug!(
            tesseract = %tesseract.display(),
            pdftoppm = %pdftoppm.display(),
            "resolved OCR binaries"
        );

        Ok(Self {
            tesseract,
            pdftoppm,
            language: config.language.clone(),
            dpi: config.dpi,
        })
    }

    async fn rasterize(&self, pdf: &Path, out_dir: &Path) -> DomainResult<Vec<PathBuf>> {
        let output = Command::new(&self.pdftoppm)
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-png")
            .arg(pdf)
            .arg(out_dir.join("page"))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| extraction_error(pdf, format!("failed to run pdftoppm: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(extraction_error(
                pdf,
                format!("pdftoppm exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        // pdftoppm zero-pads page numbers to a common width, so a plain
        // name sort is page order.
        let mut pages: Vec<PathBuf> = std::fs::read_dir(out_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
            .collect();
        pages.sort();

        if pages.is_empty() {
            return Err(extraction_error(pdf, "pdftoppm rendered no pages".to_string()));
        }

        Ok(pages)
    }

    async fn recognize(&self, image: &Path) -> Result<String, String> {
        let output = Command::new(&self.tesseract)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| format!("failed to run tesseract: {e}"))?;

        if !output.status.success() {
            return Err(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl TextExtractor for OcrExtractor {
    fn name(&self) -> &'static str {
        "ocr"
    }

    async fn extract(&self, path: &Path) -> DomainResult<String> {
        let scratch = tempfile::tempdir()?;
        let pages = self.rasterize(path, scratch.path()).await?;

        let mut text = String::new();
        for (page, image) in pages.iter().enumerate() {
            match self.recognize(image).await {
                Ok(page_text) => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Err(reason) => {
                    tracing::warn!(path = %path.display(), page, %reason, "skipping page");
                }
            }
        }

        tracing::debug!(
            path = %path.display(),
            pages = pages.len(),
            chars = text.len(),
            "OCR complete"
        );

        Ok(text)
    }
}

fn extraction_error(path: &Path, reason: String) -> DomainError {
    DomainError::Extraction {
        path: path.to_path_buf(),
        reason,
    }
}

/// `PATH` entries followed by the well-known install locations
fn search_dirs() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default();
    dirs.extend(WELL_KNOWN_DIRS.iter().map(PathBuf::from));
    dirs
}

/// Find `name`: the configured path when one is set, else the first match in `dirs`
///
/// A configured path that does not exist is an error; `dirs` are only
/// searched when nothing is configured.
pub fn locate_binary(
    name: &str,
    configured: Option<&str>,
    dirs: &[PathBuf],
) -> DomainResult<PathBuf> {
    if let Some(configured) = configured {
        let path = PathBuf::from(configured);
        if path.is_file() {
            return Ok(path);
        }
        return Err(DomainError::OcrBinaryNotFound {
            binary: name.to_string(),
            searched: path.display().to_string(),
        });
    }

    let mut searched = Vec::new();

    let candidates = [name.to_string(), format!("{name}.exe")];
    for dir in dirs {
        for candidate in &candidates {
            let path = dir.join(candidate);
            if path.is_file() {
                return Ok(path);
            }
        }
        searched.push(dir.clone());
    }

    Err(DomainError::OcrBinaryNotFound {
        binary: name.to_string(),
        searched: searched
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}
