//! Filesystem port for file I/O operations.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// What a directory entry is, as seen without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Dir,
    /// A symbolic link (never followed).
    Symlink,
    /// Anything else (sockets, fifos, devices).
    Other,
}

/// Provides filesystem access for the cleanup and aggregation passes.
///
/// Abstracting the filesystem lets both passes run against an in-memory
/// tree in tests without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Lists the entry names in a directory, sorted.
    ///
    /// Names are returned as-is, including ones that are not valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Classifies the entry at `path` without following symlinks.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be stat'ed.
    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind>;

    /// Removes a single file.
    ///
    /// # Errors
    ///
    /// Returns an error with kind [`io::ErrorKind::NotFound`] if the file is
    /// already gone, or any other I/O error on failure.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

impl<T: FileSystem + ?Sized> FileSystem for Arc<T> {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        (**self).write(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        (**self).list_dir(path)
    }

    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        (**self).entry_kind(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        (**self).remove_file(path)
    }
}
