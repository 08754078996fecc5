//! Command dispatch and handlers.

pub mod aggregate;
pub mod clean;
pub mod run;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{PurlError, Result};

/// Dispatch a parsed command line against the real filesystem.
///
/// # Errors
///
/// Returns an error if configuration loading or the selected command fails.
pub fn dispatch(cli: &Cli) -> Result<()> {
    dispatch_with_context(cli, &ServiceContext::live())
}

/// Dispatch a command line with the given service context.
///
/// # Errors
///
/// Returns an error if configuration loading or the selected command fails,
/// or if `--strict` is set and any entry was skipped.
pub fn dispatch_with_context(cli: &Cli, ctx: &ServiceContext) -> Result<()> {
    let from_file = Config::load(ctx, cli.config.as_deref())?;
    let config = from_file.with_overrides(cli.overrides());
    tracing::debug!(?config, command = ?cli.command(), "resolved configuration");

    let failures = match cli.command() {
        Command::Run => run::run_with_context(ctx, &config)?,
        Command::Clean => clean::run_with_context(ctx, &config)?,
        Command::Aggregate => aggregate::run_with_context(ctx, &config)?,
    };

    if cli.strict && failures > 0 {
        return Err(PurlError::StrictFailures { count: failures });
    }
    Ok(())
}
