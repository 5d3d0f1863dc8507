//! In-memory configuration document.
//!
//! A [`Document`] is a set of named [`Section`]s, each mapping keys to raw
//! string values. Documents parsed from individual files are folded together
//! with [`Document::merge`]; the later document wins on key collisions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::convert::{parse_bool, parse_float, parse_int};

/// Name of the section holding keys that appear before any header.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A named group of key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Section {
    entries: BTreeMap<String, String>,
}

impl Section {
    /// Raw value for `key`, if set in this section.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Merged configuration built from one or more files.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    sections: BTreeMap<String, Section>,

    /// Files folded into this document, in merge order.
    sources: Vec<PathBuf>,
}

impl Document {
    /// An empty document: every lookup yields the caller's default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Section by name. `""` refers to [`DEFAULT_SECTION`].
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(normalize_section(name))
    }

    /// Section by name, created empty if missing.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        self.sections
            .entry(normalize_section(name).to_string())
            .or_default()
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(normalize_section(name))
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub(crate) fn push_source(&mut self, path: &Path) {
        self.sources.push(path.to_path_buf());
    }

    pub fn is_empty(&self) -> bool {
        self.sections.values().all(Section::is_empty)
    }

    /// Fold `other` into `self`. Values from `other` override existing keys.
    pub fn merge(&mut self, other: Document) {
        for (name, section) in other.sections {
            let target = self.sections.entry(name).or_default();
            target.entries.extend(section.entries);
        }
        self.sources.extend(other.sources);
    }

    /// Raw value lookup.
    ///
    /// A dotted section `a.b.c` falls back to `a.b`, then `a`, when the key
    /// is not set on the section itself.
    pub fn value(&self, section: &str, key: &str) -> Option<&str> {
        let mut name = normalize_section(section);
        loop {
            if let Some(value) = self.sections.get(name).and_then(|s| s.get(key)) {
                return Some(value);
            }
            match name.rfind('.') {
                Some(idx) => name = &name[..idx],
                None => return None,
            }
        }
    }

    /// String value, or `default` if absent or empty.
    pub fn get(&self, section: &str, key: &str, default: &str) -> String {
        match self.value(section, key) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => default.to_string(),
        }
    }

    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.convert(section, key, default, "integer", parse_int)
    }

    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.convert(section, key, default, "boolean", parse_bool)
    }

    pub fn get_float64(&self, section: &str, key: &str, default: f64) -> f64 {
        self.convert(section, key, default, "float", parse_float)
    }

    fn convert<T>(
        &self,
        section: &str,
        key: &str,
        default: T,
        kind: &'static str,
        parse: fn(&str) -> Option<T>,
    ) -> T {
        let Some(raw) = self.value(section, key) else {
            return default;
        };
        match parse(raw) {
            Some(value) => value,
            None => {
                tracing::debug!(
                    section = %section,
                    key = %key,
                    value = %raw,
                    kind,
                    "Config value not convertible, using default"
                );
                default
            }
        }
    }
}

fn normalize_section(name: &str) -> &str {
    if name.is_empty() {
        DEFAULT_SECTION
    } else {
        name
    }
}
