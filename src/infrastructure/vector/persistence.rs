//! On-disk index format
//!
//! Two files written side by side:
//! - the vector file, a bincode-encoded header plus one flat `f32` buffer
//! - the metadata file, a JSON array of `{source, text}` aligned 1:1 with
//!   the vector rows
//!
//! Loading checks both halves agree before handing back a searchable index.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::flat_index::FlatIndex;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ChunkRecord, DistanceMetric, IndexConfig};
use crate::domain::ports::VectorSearch;

const FORMAT_VERSION: u32 = 1;

/// Locations of the two index files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPaths {
    /// Vector file
    pub index: PathBuf,
    /// Metadata file
    pub metadata: PathBuf,
}

impl IndexPaths {
    /// Paths given explicitly
    pub fn new(index: impl Into<PathBuf>, metadata: impl Into<PathBuf>) -> Self {
        Self {
            index: index.into(),
            metadata: metadata.into(),
        }
    }

    /// `index.bin` and `metadata.json` inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("index.bin"), dir.join("metadata.json"))
    }
}

impl From<&IndexConfig> for IndexPaths {
    fn from(config: &IndexConfig) -> Self {
        Self::new(&config.path, &config.metadata_path)
    }
}

#[derive(Serialize, Deserialize)]
struct StoredVectors {
    version: u32,
    metric: DistanceMetric,
    dimension: u64,
    vectors: Vec<f32>,
}

/// Write the index and its metadata, creating parent directories
///
/// Both files are written in full to temporaries beside their targets
/// before either target is replaced, so a failed save leaves the previous
/// pair in place.
pub fn save_index(index: &FlatIndex, paths: &IndexPaths) -> DomainResult<()> {
    let stored = StoredVectors {
        version: FORMAT_VERSION,
        metric: index.metric(),
        dimension: index.dimension() as u64,
        vectors: index.raw_vectors().to_vec(),
    };
    let records: Vec<ChunkRecord> = index.chunks().iter().map(|c| c.to_record()).collect();

    let vectors_file = stage(&paths.index, |writer| {
        bincode::serialize_into(writer, &stored).map_err(DomainError::from)
    })?;
    let metadata_file = stage(&paths.metadata, |writer| {
        serde_json::to_writer(writer, &records).map_err(DomainError::from)
    })?;

    persist(metadata_file, &paths.metadata)?;
    persist(vectors_file, &paths.index)?;

    tracing::info!(
        vectors = records.len(),
        index = %paths.index.display(),
        metadata = %paths.metadata.display(),
        "saved index"
    );

    Ok(())
}

/// Write a complete temporary file in `target`'s directory
fn stage<F>(target: &Path, write: F) -> DomainResult<NamedTempFile>
where
    F: FnOnce(&mut BufWriter<&File>) -> DomainResult<()>,
{
    let dir = parent_dir(target);
    fs::create_dir_all(dir)?;

    let file = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(file.as_file());
        write(&mut writer)?;
        writer.flush()?;
    }
    file.as_file().sync_all()?;

    Ok(file)
}

fn persist(file: NamedTempFile, target: &Path) -> DomainResult<()> {
    file.persist(target).map_err(|e| DomainError::Io(e.error))?;
    Ok(())
}

/// Read an index written by [`save_index`]
///
/// # Errors
/// * `MissingIndex` - either file is absent
/// * `ShapeMismatch` - vector rows and metadata records disagree
/// * `Serialization` - a file is corrupt or from another format version
pub fn load_index(paths: &IndexPaths) -> DomainResult<FlatIndex> {
    for path in [&paths.index, &paths.metadata] {
        if !path.exists() {
            return Err(DomainError::MissingIndex(path.clone()));
        }
    }

    let stored: StoredVectors =
        bincode::deserialize_from(BufReader::new(File::open(&paths.index)?))?;
    if stored.version != FORMAT_VERSION {
        return Err(DomainError::Serialization(format!(
            "unsupported index format version {} (expected {FORMAT_VERSION})",
            stored.version
        )));
    }

    let records: Vec<ChunkRecord> =
        serde_json::from_reader(BufReader::new(File::open(&paths.metadata)?))?;
    let chunks = records
        .into_iter()
        .enumerate()
        .map(|(position, record)| record.into_chunk(position))
        .collect();

    let dimension = usize::try_from(stored.dimension)
        .map_err(|_| DomainError::Serialization("index dimension overflows usize".to_string()))?;
    let index = FlatIndex::from_parts(stored.metric, dimension, stored.vectors, chunks)?;

    tracing::debug!(
        vectors = index.chunks().len(),
        dimension,
        index = %paths.index.display(),
        "loaded index"
    );

    Ok(index)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
