//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{CollisionPolicy, ConfigOverrides};

/// Top-level CLI parser for `purlgen`.
#[derive(Debug, Parser)]
#[command(name = "purlgen", version, about = "Aggregate purl manifests into one JSON document")]
pub struct Cli {
    /// YAML config file. Defaults to `./purlgen.yml` when present.
    #[arg(long, global = true, env = "PURLGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root of the resource tree (`<project>/<subdirectory>/purls.yml`).
    #[arg(long, global = true, env = "PURLGEN_RESOURCE_DIR")]
    pub resource_dir: Option<PathBuf>,

    /// Where to write the JSON document.
    #[arg(long, global = true, env = "PURLGEN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Schema tag written to the `version` field.
    #[arg(long, global = true, env = "PURLGEN_SCHEMA_VERSION")]
    pub schema_version: Option<String>,

    /// How to handle the same subdirectory name in two projects.
    #[arg(long, global = true, value_enum, env = "PURLGEN_ON_COLLISION")]
    pub on_collision: Option<CollisionPolicy>,

    /// Exit non-zero if any project or subdirectory was skipped.
    #[arg(long, global = true)]
    pub strict: bool,

    /// The command to execute. Defaults to `run`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Remove `.DS_Store` files, then aggregate manifests.
    Run,
    /// Only remove `.DS_Store` files.
    Clean,
    /// Only aggregate manifests.
    Aggregate,
}

impl Cli {
    /// The selected command, falling back to [`Command::Run`].
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }

    /// Flag and environment values that override the config file.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            resource_dir: self.resource_dir.clone(),
            output_path: self.output.clone(),
            version: self.schema_version.clone(),
            on_collision: self.on_collision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use crate::config::CollisionPolicy;
    use clap::Parser;

    #[test]
    fn no_arguments_defaults_to_run() {
        let cli = Cli::parse_from(["purlgen"]);
        assert_eq!(cli.command(), Command::Run);
        assert!(!cli.strict);
    }

    #[test]
    fn parses_clean_subcommand() {
        let cli = Cli::parse_from(["purlgen", "clean"]);
        assert_eq!(cli.command(), Command::Clean);
    }

    #[test]
    fn flags_become_overrides() {
        let cli = Cli::parse_from([
            "purlgen",
            "aggregate",
            "--resource-dir",
            "/data",
            "--output",
            "/tmp/out.json",
            "--schema-version",
            "2.0",
            "--on-collision",
            "error",
        ]);
        let overrides = cli.overrides();
        assert_eq!(cli.command(), Command::Aggregate);
        assert_eq!(
            overrides.resource_dir.as_deref(),
            Some(std::path::Path::new("/data"))
        );
        assert_eq!(overrides.version.as_deref(), Some("2.0"));
        assert_eq!(overrides.on_collision, Some(CollisionPolicy::Error));
    }

    #[test]
    fn rejects_unknown_collision_policy() {
        assert!(Cli::try_parse_from(["purlgen", "--on-collision", "merge"]).is_err());
    }
}
