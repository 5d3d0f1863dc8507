//! Settings for the store itself: where configuration files live and which
//! ones are picked up.

use std::path::PathBuf;

use serde::Deserialize;

/// Environment variable overriding [`StoreOptions::dir`].
pub const DIR_ENV: &str = "CONFSTORE_DIR";

/// Environment variable overriding [`StoreOptions::extension`].
pub const EXTENSION_ENV: &str = "CONFSTORE_EXTENSION";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreOptions {
    /// Directory scanned for configuration files.
    pub dir: PathBuf,

    /// File name suffix that marks a configuration file (e.g., ".ini").
    pub extension: String,

    /// Files merged before the directory scan, in order.
    pub files: Vec<PathBuf>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("config"),
            extension: ".ini".to_string(),
            files: Vec::new(),
        }
    }
}

impl StoreOptions {
    /// Options scanning `dir` with the default extension.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Defaults with [`DIR_ENV`] and [`EXTENSION_ENV`] applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Add a file merged ahead of the directory contents.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(DIR_ENV).filter(|v| !v.is_empty()) {
            self.dir = PathBuf::from(dir);
        }
        if let Some(ext) = lookup(EXTENSION_ENV).filter(|v| !v.is_empty()) {
            self.extension = ext;
        }
        self
    }
}
