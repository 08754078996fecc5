//! Core library entry for the `purlgen` CLI.
//!
//! `purlgen` removes stray `.DS_Store` files from a resource tree and merges
//! every `<project>/<subdirectory>/purls.yml` manifest into one JSON document.

pub mod adapters;
pub mod aggregate;
pub mod cleanup;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod manifest;
pub mod ports;

use clap::error::ErrorKind::{DisplayHelp, DisplayVersion};
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), DisplayHelp | DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli).map_err(|err| format!("error: {err}"))
}
