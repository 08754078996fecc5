//! Aggregated purl document and per-run reporting types.
//!
//! The document is a flat JSON object: a `version` tag followed by one key per
//! subdirectory holding that subdirectory's purl list.

pub mod collector;

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::EntryError;

pub use collector::{collect, run, write_document};

/// Key under which the schema tag is stored.
pub const VERSION_KEY: &str = "version";

/// The consolidated output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurlDocument {
    version: String,
    entries: BTreeMap<String, Vec<String>>,
}

impl PurlDocument {
    /// Creates an empty document stamped with `version`.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Schema tag of this document.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Inserts or replaces an entry, returning the replaced list.
    pub fn insert(&mut self, key: impl Into<String>, purls: Vec<String>) -> Option<Vec<String>> {
        self.entries.insert(key.into(), purls)
    }

    /// Looks up the purl list stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Number of subdirectory entries (the `version` field is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no subdirectory entries were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Renders the document as 2-space indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for PurlDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 1))?;
        map.serialize_entry(VERSION_KEY, &self.version)?;
        for (key, purls) in &self.entries {
            map.serialize_entry(key, purls)?;
        }
        map.end()
    }
}

/// A non-fatal failure tied to the project it occurred in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    /// Project directory name.
    pub project: String,
    /// Classified error.
    pub error: EntryError,
}

/// A key that was replaced under the overwrite policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overwrite {
    /// Colliding subdirectory name.
    pub key: String,
    /// Project whose entry was discarded.
    pub replaced_project: String,
    /// Project whose entry was kept.
    pub project: String,
}

/// Everything an aggregation pass produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateReport {
    /// The assembled document.
    pub document: PurlDocument,
    /// Entries that were skipped.
    pub failures: Vec<EntryFailure>,
    /// Keys replaced by a later project.
    pub overwrites: Vec<Overwrite>,
}

impl AggregateReport {
    /// Returns `true` if nothing was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of failures per [`EntryError::kind`] label.
    #[must_use]
    pub fn failure_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failures {
            *counts.entry(failure.error.kind()).or_insert(0) += 1;
        }
        counts
    }
}
