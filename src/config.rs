//! Run configuration: where to scan, where to write, and which schema tag to stamp.
//!
//! Values are layered: built-in defaults, then an optional YAML config file,
//! then environment variables and command-line flags (both resolved by clap
//! into [`ConfigOverrides`]).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::context::ServiceContext;
use crate::error::{PurlError, Result};

/// Default resource tree, relative to the working directory.
pub const DEFAULT_RESOURCE_DIR: &str = "./resource";
/// Default output document path.
pub const DEFAULT_OUTPUT_PATH: &str = "./purls.json";
/// Default schema tag written to the `version` field.
pub const DEFAULT_VERSION: &str = "1.1";
/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "purlgen.yml";

/// What to do when two projects contain a subdirectory with the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// The later project replaces the earlier entry (logged as a warning).
    #[default]
    Overwrite,
    /// The earlier entry is kept and the later one is recorded as a failure.
    Error,
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root of the resource tree to clean and scan.
    pub resource_dir: PathBuf,
    /// Where the JSON document is written.
    pub output_path: PathBuf,
    /// Schema tag stored under `version`.
    pub version: String,
    /// Cross-project key collision handling.
    pub on_collision: CollisionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from(DEFAULT_RESOURCE_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            version: DEFAULT_VERSION.to_string(),
            on_collision: CollisionPolicy::default(),
        }
    }
}

/// Values supplied by flags or environment that win over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Overrides [`Config::resource_dir`].
    pub resource_dir: Option<PathBuf>,
    /// Overrides [`Config::output_path`].
    pub output_path: Option<PathBuf>,
    /// Overrides [`Config::version`].
    pub version: Option<String>,
    /// Overrides [`Config::on_collision`].
    pub on_collision: Option<CollisionPolicy>,
}

impl Config {
    /// Parses a config file body. Missing keys fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PurlError::Config`] on malformed YAML or unknown keys.
    pub fn from_yaml(path: &Path, contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|e| PurlError::Config {
            path: path.to_path_buf(),
            details: e.to_string(),
        })
    }

    /// Loads the config file, if any.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read when present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`PurlError::Config`] if the file cannot be read or parsed.
    pub fn load(ctx: &ServiceContext, explicit: Option<&Path>) -> Result<Self> {
        let path = if let Some(path) = explicit {
            path.to_path_buf()
        } else {
            let implicit = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !ctx.fs.exists(&implicit) {
                tracing::debug!("no config file found, using defaults");
                return Ok(Self::default());
            }
            implicit
        };
        let contents = ctx
            .fs
            .read_to_string(&path)
            .map_err(|e| PurlError::Config {
                path: path.clone(),
                details: e.to_string(),
            })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_yaml(&path, &contents)
    }

    /// Applies flag and environment overrides on top of this config.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(dir) = overrides.resource_dir {
            self.resource_dir = dir;
        }
        if let Some(path) = overrides.output_path {
            self.output_path = path;
        }
        if let Some(version) = overrides.version {
            self.version = version;
        }
        if let Some(policy) = overrides.on_collision {
            self.on_collision = policy;
        }
        self
    }
}
