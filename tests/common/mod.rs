//! Shared utilities for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

#[allow(dead_code)]
pub const TEST_CONFIG_NAME: &str = "test_config.ini";

#[allow(dead_code)]
pub const TEST_CONFIG: &str = "\
[test]
val_string = test
val_int = 5
val_bool = true
val_float = 5.5
";

/// A throwaway configuration directory.
pub struct ConfigDir {
    dir: TempDir,
}

impl ConfigDir {
    pub fn new() -> Self {
        confstore::init_logging(Some("confstore=debug"));
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` in one step.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Replace `name` atomically so concurrent loads never see a torn file.
    #[allow(dead_code)]
    pub fn replace(&self, name: &str, content: &str) {
        let tmp = self.dir.path().join(format!("{name}.tmp"));
        fs::write(&tmp, content).unwrap();
        fs::rename(&tmp, self.dir.path().join(name)).unwrap();
    }
}
