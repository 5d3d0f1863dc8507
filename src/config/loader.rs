//! Configuration loading from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::document::Document;
use crate::config::options::StoreOptions;
use crate::config::parser::{self, ParseError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot list config directory {}: {source}", path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    #[error("cannot read config file {}: {source}", path.display())]
    ReadFile { path: PathBuf, source: io::Error },

    #[error("load config failed: {}: {source}", path.display())]
    Parse { path: PathBuf, source: ParseError },
}

/// Files in `dir` whose name ends with `extension`, sorted by file name.
///
/// Directories are skipped even when their name matches.
pub fn discover(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let read_dir_err = |source| ConfigError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            tracing::debug!(path = ?entry.path(), "Skipping non UTF-8 file name");
            continue;
        };
        if !name.ends_with(extension) {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        found.push(path);
    }

    found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(found)
}

/// Read and parse a single file.
pub fn load_file(path: &Path) -> Result<Document, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut doc = parser::parse(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    doc.push_source(path);
    Ok(doc)
}

/// Build the merged document described by `options`.
///
/// Explicit files come first, then the directory contents in name order.
/// Any failure aborts the whole load.
pub fn load_config(options: &StoreOptions) -> Result<Document, ConfigError> {
    let mut paths = options.files.clone();
    paths.extend(discover(&options.dir, &options.extension)?);

    let mut merged = Document::new();
    for path in &paths {
        tracing::debug!(path = %path.display(), "Loading config file");
        merged.merge(load_file(path)?);
    }

    Ok(merged)
}
