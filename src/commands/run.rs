//! `purlgen run` command (the default).

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;

use super::{aggregate, clean};

/// Execute the `run` command: cleanup followed by aggregation.
///
/// Returns the combined number of cleanup and aggregation failures.
///
/// # Errors
///
/// Returns an error if the resource root cannot be listed or the output
/// cannot be written.
pub fn run_with_context(ctx: &ServiceContext, config: &Config) -> Result<usize> {
    let cleanup_failures = clean::run_with_context(ctx, config)?;
    let aggregate_failures = aggregate::run_with_context(ctx, config)?;
    Ok(cleanup_failures + aggregate_failures)
}
