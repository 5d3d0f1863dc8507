//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config subsystem produces:
//!     → info:  document installed (files, sections)
//!     → debug: files discovered, values falling back to defaults
//!     → warn:  update failed, previous document kept
//!
//! Consumers:
//!     → whatever subscriber the host installs, or logging::init_logging
//! ```

pub mod logging;

pub use logging::init_logging;
