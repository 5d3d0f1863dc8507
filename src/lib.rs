//! INI configuration store.
//!
//! Loads every `*.ini` file from a configuration directory, merges them in
//! file name order and serves typed lookups that fall back to a caller
//! default instead of failing.
//!
//! ```no_run
//! use confstore::{ConfigStore, StoreOptions};
//!
//! let store = ConfigStore::open(StoreOptions::from_env())?;
//! let workers = store.get_int("server", "workers", 4);
//! let debug = store.get_bool("server", "debug", false);
//! # Ok::<(), confstore::ConfigError>(())
//! ```

pub mod config;
pub mod observability;

pub use config::{ConfigError, ConfigStore, Document, Section, StoreOptions};
pub use observability::init_logging;
