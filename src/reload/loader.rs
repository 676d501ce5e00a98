//! Mapping file loading from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;

use crate::document::{Document, ParseError};

/// Error type for mapping file loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be stat'ed, opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The content is not a mapping-rooted YAML document.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },
}

impl LoadError {
    /// Stable label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Io { .. } => "io",
            LoadError::Parse { .. } => "parse",
        }
    }
}

/// Modification time of the file at `path`.
pub fn modified_time(path: &Path) -> Result<SystemTime, LoadError> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Read and parse the mapping file at `path`.
///
/// The modification time is taken before the content is read, so a write
/// racing this call leaves a newer mtime behind for the next check.
pub fn read_document(path: &Path) -> Result<(Document, SystemTime), LoadError> {
    let modified = modified_time(path)?;

    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document = Document::from_yaml_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok((document, modified))
}
