//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config dir (*.ini, name order) + explicit files
//!     → loader.rs (discover & read)
//!     → parser.rs (INI text → Document per file)
//!     → Document::merge (later file wins)
//!     → store.rs (atomic swap of Arc<Document>)
//!     → typed lookups with caller defaults
//!
//! On update:
//!     same pipeline, old Document visible until the new one is installed
//! ```
//!
//! # Design Decisions
//! - Load is all-or-nothing; any unreadable or malformed file fails it
//! - Lookups are total and never surface errors
//! - Documents are immutable once installed; changes require a full reload

pub mod convert;
pub mod document;
pub mod loader;
pub mod options;
pub mod parser;
pub mod store;

pub use document::{Document, Section, DEFAULT_SECTION};
pub use loader::ConfigError;
pub use options::StoreOptions;
pub use parser::{ParseError, ParseErrorKind};
pub use store::ConfigStore;
