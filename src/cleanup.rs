//! Removes OS metadata files (`.DS_Store`) from the resource tree.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::error::{PurlError, Result};
use crate::ports::EntryKind;

/// File name removed by the cleanup pass.
pub const DS_STORE: &str = ".DS_Store";

/// Outcome of a cleanup pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    /// Files that were deleted.
    pub removed: Vec<PathBuf>,
    /// Paths that could not be listed or deleted, with the error message.
    pub failures: Vec<(PathBuf, String)>,
}

/// Deletes every regular `.DS_Store` file under `root`, at any depth.
///
/// Symlinks are neither followed nor removed. Files that disappear before
/// deletion are skipped silently; other failures below the root are logged
/// and recorded without stopping the walk.
///
/// # Errors
///
/// Returns [`PurlError::ResourceRoot`] if `root` itself cannot be listed.
pub fn remove_ds_store(ctx: &ServiceContext, root: &Path) -> Result<CleanupReport> {
    let mut report = CleanupReport::default();
    let top = ctx
        .fs
        .list_dir(root)
        .map_err(|source| PurlError::ResourceRoot {
            path: root.to_path_buf(),
            source,
        })?;

    let mut stack: Vec<(PathBuf, Vec<OsString>)> = vec![(root.to_path_buf(), top)];
    while let Some((dir, names)) = stack.pop() {
        for name in names {
            let path = dir.join(&name);
            let kind = match ctx.fs.entry_kind(&path) {
                Ok(kind) => kind,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    record_failure(&mut report, path, &e);
                    continue;
                }
            };
            match kind {
                EntryKind::Dir => match ctx.fs.list_dir(&path) {
                    Ok(children) => stack.push((path, children)),
                    Err(e) => record_failure(&mut report, path, &e),
                },
                EntryKind::File if name.as_os_str() == OsStr::new(DS_STORE) => {
                    remove_one(ctx, &mut report, path);
                }
                _ => {}
            }
        }
    }

    tracing::info!(
        removed = report.removed.len(),
        failures = report.failures.len(),
        "cleanup finished"
    );
    Ok(report)
}

fn remove_one(ctx: &ServiceContext, report: &mut CleanupReport, path: PathBuf) {
    match ctx.fs.remove_file(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed metadata file");
            report.removed.push(path);
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "metadata file already gone");
        }
        Err(e) => record_failure(report, path, &e),
    }
}

fn record_failure(report: &mut CleanupReport, path: PathBuf, err: &io::Error) {
    tracing::warn!(path = %path.display(), error = %err, "cleanup could not process path");
    report.failures.push((path, err.to_string()));
}
