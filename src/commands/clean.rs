//! `purlgen clean` command.

use crate::cleanup;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;

/// Execute the `clean` command: remove `.DS_Store` files under the resource root.
///
/// Returns the number of paths that could not be cleaned.
///
/// # Errors
///
/// Returns an error if the resource root cannot be listed.
pub fn run_with_context(ctx: &ServiceContext, config: &Config) -> Result<usize> {
    let report = cleanup::remove_ds_store(ctx, &config.resource_dir)?;
    Ok(report.failures.len())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::run_with_context;
    use crate::adapters::memory::MemoryFileSystem;
    use crate::config::Config;
    use crate::context::ServiceContext;

    #[test]
    fn clean_does_not_write_output() {
        let fs = Arc::new(MemoryFileSystem::new().with_file("/res/p/.DS_Store", ""));
        let ctx = ServiceContext::with_fs(Arc::clone(&fs));
        let config = Config {
            resource_dir: PathBuf::from("/res"),
            output_path: PathBuf::from("/purls.json"),
            ..Config::default()
        };

        assert_eq!(run_with_context(&ctx, &config).unwrap(), 0);
        assert!(fs.files().is_empty());
    }
}
