//! The configuration service handed to the rest of the application.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;

use crate::config::document::Document;
use crate::config::loader::{load_config, ConfigError};
use crate::config::options::StoreOptions;

/// Holds the active [`Document`] and serves typed lookups against it.
///
/// Lookups never fail: a missing key, an empty value or a value that does
/// not convert to the requested type yields the caller's default. All
/// fallibility lives in [`ConfigStore::init`] and [`ConfigStore::update`].
///
/// Share it between threads behind an `Arc`.
pub struct ConfigStore {
    options: StoreOptions,
    current: ArcSwap<Document>,
    /// Serializes writers; readers never take it.
    reload_lock: Mutex<()>,
}

impl ConfigStore {
    /// Create a store with an empty document. Call [`init`](Self::init)
    /// before relying on any lookup.
    pub fn new(options: StoreOptions) -> Self {
        Self {
            options,
            current: ArcSwap::from_pointee(Document::new()),
            reload_lock: Mutex::new(()),
        }
    }

    /// Create and load in one step.
    pub fn open(options: StoreOptions) -> Result<Self, ConfigError> {
        let store = Self::new(options);
        store.init()?;
        Ok(store)
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Load every configuration file and install the merged document.
    ///
    /// On error nothing is installed; the caller is expected to abort
    /// startup.
    pub fn init(&self) -> Result<(), ConfigError> {
        self.reload()
    }

    /// Rebuild the document from disk and swap it in.
    ///
    /// Readers keep seeing the previous document until the new one is fully
    /// built. On error the previous document stays installed.
    pub fn update(&self) -> Result<(), ConfigError> {
        self.reload().inspect_err(|e| {
            tracing::warn!(error = %e, "Config update failed. Keeping current configuration.");
        })
    }

    fn reload(&self) -> Result<(), ConfigError> {
        // A poisoned lock only means another reload panicked; the swap
        // itself is atomic so the document is still whole.
        let _guard = self
            .reload_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let doc = load_config(&self.options)?;
        tracing::info!(
            dir = %self.options.dir.display(),
            files = doc.sources().len(),
            sections = doc.section_names().count(),
            "Configuration loaded"
        );
        self.current.store(Arc::new(doc));
        Ok(())
    }

    /// The current document, for several reads that must agree.
    pub fn snapshot(&self) -> Arc<Document> {
        self.current.load_full()
    }

    pub fn get(&self, section: &str, key: &str, default: &str) -> String {
        self.current.load().get(section, key, default)
    }

    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.current.load().get_int(section, key, default)
    }

    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.current.load().get_bool(section, key, default)
    }

    pub fn get_float64(&self, section: &str, key: &str, default: f64) -> f64 {
        self.current.load().get_float64(section, key, default)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.current.load().has_section(name)
    }

    pub fn section_names(&self) -> Vec<String> {
        self.current
            .load()
            .section_names()
            .map(str::to_string)
            .collect()
    }

    /// Files behind the current document, in merge order.
    pub fn loaded_files(&self) -> Vec<PathBuf> {
        self.current.load().sources().to_vec()
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("options", &self.options)
            .field("document", &self.current.load_full())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TEST_CONFIG: &str =
        "[test]\nval_string = test\nval_int = 5\nval_bool = true\nval_float = 5.5\n";

    #[test]
    fn test_lookups_before_init_use_defaults() {
        let store = ConfigStore::new(StoreOptions::new("/nonexistent"));
        assert_eq!(store.options().dir, PathBuf::from("/nonexistent"));
        assert_eq!(store.options().extension, ".ini");
        assert_eq!(store.get("test", "val_string", "none"), "none");
        assert_eq!(store.get_int("test", "val_int", -5), -5);
        assert!(store.loaded_files().is_empty());
    }

    #[test]
    fn test_init_then_get() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("test_config.ini"), TEST_CONFIG).unwrap();

        let store = ConfigStore::open(StoreOptions::new(dir.path())).unwrap();
        assert_eq!(store.get("test", "val_string", "none"), "test");
        assert_eq!(store.get("test", "val_string_1", "none"), "none");
        assert_eq!(store.get_int("test", "val_int", -5), 5);
        assert!(store.get_bool("test", "val_bool", false));
        assert_eq!(store.get_float64("test", "val_float", 9.2), 5.5);
        assert!(store.has_section("test"));
        assert!(!store.has_section("test1"));
    }

    #[test]
    fn test_failed_update_keeps_previous_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.ini");
        fs::write(&path, "[app]\nmode = stable\n").unwrap();

        let store = ConfigStore::open(StoreOptions::new(dir.path())).unwrap();
        fs::write(&path, "[app\nmode = broken\n").unwrap();

        assert!(store.update().is_err());
        assert_eq!(store.get("app", "mode", ""), "stable");
    }

    #[test]
    fn test_update_swaps_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.ini");
        fs::write(&path, "[app]\nmode = old\n").unwrap();

        let store = ConfigStore::open(StoreOptions::new(dir.path())).unwrap();
        let before = store.snapshot();
        fs::write(&path, "[app]\nmode = new\n").unwrap();
        store.update().unwrap();

        assert_eq!(store.get("app", "mode", ""), "new");
        // earlier snapshots are unaffected by the swap
        assert_eq!(before.get("app", "mode", ""), "old");
    }
}
