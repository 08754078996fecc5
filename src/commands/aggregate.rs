//! `purlgen aggregate` command.

use crate::aggregate;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;

/// Execute the `aggregate` command: build and write the purl document.
///
/// Returns the number of skipped projects or subdirectories.
///
/// # Errors
///
/// Returns an error if the resource root cannot be listed or the output
/// cannot be written.
pub fn run_with_context(ctx: &ServiceContext, config: &Config) -> Result<usize> {
    let report = aggregate::run(ctx, config)?;
    Ok(report.failures.len())
}
