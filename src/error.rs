//! Error types for the cleanup and aggregation passes.
//!
//! [`PurlError`] ends the run. [`EntryError`] is recorded against a single
//! project or subdirectory and the run carries on.

use std::path::PathBuf;

use thiserror::Error;

/// Shared `Result` alias for run-level operations.
pub type Result<T> = std::result::Result<T, PurlError>;

/// Fatal error that aborts the run.
#[derive(Debug, Error)]
pub enum PurlError {
    /// The resource root is missing or cannot be listed.
    #[error("cannot read resource directory {path}: {source}")]
    ResourceRoot {
        /// Configured resource root.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The output document could not be written.
    #[error("cannot write output file {path}: {source}")]
    WriteOutput {
        /// Configured output path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The output document could not be serialized.
    #[error("cannot serialize output document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The configuration file is unreadable or invalid.
    #[error("invalid configuration in {path}: {details}")]
    Config {
        /// Config file that was being loaded.
        path: PathBuf,
        /// What went wrong.
        details: String,
    },

    /// `--strict` was set and at least one entry failed.
    #[error("{count} entries could not be processed")]
    StrictFailures {
        /// Number of recorded entry failures.
        count: usize,
    },
}

/// Non-fatal failure for one project or subdirectory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// Listing a project or reading a manifest failed.
    #[error("could not read {path}: {details}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// I/O error message.
        details: String,
    },

    /// The manifest is not valid YAML.
    #[error("could not parse {path}: {details}")]
    Parse {
        /// Offending manifest.
        path: PathBuf,
        /// Parser message.
        details: String,
    },

    /// The manifest parsed but has no usable `purls` sequence.
    #[error("unexpected manifest shape in {path}: {details}")]
    Schema {
        /// Offending manifest.
        path: PathBuf,
        /// What was expected.
        details: String,
    },

    /// The subdirectory name collides with the `version` field.
    #[error("subdirectory {path} uses the reserved key `{key}`")]
    ReservedKey {
        /// Offending subdirectory.
        path: PathBuf,
        /// The reserved key.
        key: String,
    },

    /// Another project already produced this key and collisions are errors.
    #[error("duplicate key `{key}` in {path} (first seen in project `{first_project}`)")]
    Duplicate {
        /// Offending subdirectory.
        path: PathBuf,
        /// Colliding key.
        key: String,
        /// Project that produced the kept entry.
        first_project: String,
    },
}

impl EntryError {
    /// Short classification label used in log lines and summaries.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Parse { .. } => "parse",
            Self::Schema { .. } => "schema",
            Self::ReservedKey { .. } => "reserved-key",
            Self::Duplicate { .. } => "duplicate",
        }
    }
}
