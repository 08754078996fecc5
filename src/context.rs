//! Service context bundling the port trait objects.

use crate::adapters::live::LiveFileSystem;
use crate::ports::filesystem::FileSystem;

/// Bundles all port trait objects into a single context.
///
/// Every pass takes the context rather than touching `std::fs` directly, so
/// the same code runs against the real disk or an in-memory tree.
pub struct ServiceContext {
    /// Filesystem for file I/O.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a live context backed by the real filesystem.
    #[must_use]
    pub fn live() -> Self {
        Self {
            fs: Box::new(LiveFileSystem),
        }
    }

    /// Creates a context around the given filesystem adapter.
    #[must_use]
    pub fn with_fs(fs: impl FileSystem + 'static) -> Self {
        Self { fs: Box::new(fs) }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::adapters::memory::MemoryFileSystem;

    #[test]
    fn with_fs_routes_io_through_adapter() {
        let ctx = ServiceContext::with_fs(MemoryFileSystem::new().with_file("/a.txt", "hi"));
        assert_eq!(ctx.fs.read_to_string(Path::new("/a.txt")).unwrap(), "hi");
        assert!(!ctx.fs.exists(Path::new("/b.txt")));
    }

    #[test]
    fn live_context_reads_disk() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ServiceContext::live();
        assert!(ctx.fs.exists(dir.path()));
    }
}
