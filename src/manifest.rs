//! `purls.yml` manifest parsing.

use std::path::Path;

use serde_yaml::Value;

use crate::context::ServiceContext;
use crate::error::EntryError;

/// File name of the manifest expected in every subdirectory.
pub const MANIFEST_FILE: &str = "purls.yml";
/// Top-level key holding the purl sequence.
pub const PURLS_KEY: &str = "purls";

/// Parsed manifest. Keys other than `purls` are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Package URLs in file order.
    pub purls: Vec<String>,
}

impl Manifest {
    /// Parses a manifest body, separating YAML syntax errors from shape errors.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::Parse`] for invalid YAML and [`EntryError::Schema`]
    /// when `purls` is absent or is not a sequence of strings.
    pub fn parse(path: &Path, contents: &str) -> Result<Self, EntryError> {
        let value: Value = serde_yaml::from_str(contents).map_err(|e| EntryError::Parse {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        let schema = |details: String| EntryError::Schema {
            path: path.to_path_buf(),
            details,
        };

        let Value::Mapping(mut mapping) = value else {
            return Err(schema(format!("expected a mapping with a `{PURLS_KEY}` key")));
        };
        let purls = mapping
            .remove(PURLS_KEY)
            .ok_or_else(|| schema(format!("missing `{PURLS_KEY}` key")))?;
        let purls: Vec<String> = serde_yaml::from_value(purls)
            .map_err(|e| schema(format!("`{PURLS_KEY}` must be a list of strings: {e}")))?;
        Ok(Self { purls })
    }

    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Manifest::parse`].
    pub fn load(ctx: &ServiceContext, path: &Path) -> Result<Self, EntryError> {
        let contents = ctx
            .fs
            .read_to_string(path)
            .map_err(|e| EntryError::Io {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;
        Self::parse(path, &contents)
    }
}
