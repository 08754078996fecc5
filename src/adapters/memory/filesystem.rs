//! In-memory filesystem adapter for deterministic tests.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::ports::filesystem::{EntryKind, FileSystem};

#[derive(Debug, Clone)]
enum Node {
    File(String),
    Dir,
    Symlink,
}

/// Filesystem held entirely in memory.
///
/// Directories are explicit nodes; adding a file creates its ancestors.
/// Individual paths can be made to fail with a chosen error kind.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
    failures: Mutex<HashMap<PathBuf, io::ErrorKind>>,
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

fn invalid(what: &str, path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{what}: {}", path.display()),
    )
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, creating any missing parent directories.
    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>, contents: &str) -> Self {
        self.insert(path.as_ref(), Node::File(contents.to_string()));
        self
    }

    /// Adds an empty directory (and its ancestors).
    #[must_use]
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), Node::Dir);
        self
    }

    /// Adds a symlink entry. Its target is irrelevant because links are never followed.
    #[must_use]
    pub fn with_symlink(self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), Node::Symlink);
        self
    }

    /// Makes `read_to_string`, `list_dir` and `remove_file` on `path` fail
    /// with `kind`, whether or not the entry exists.
    #[must_use]
    pub fn with_failure(self, path: impl AsRef<Path>, kind: io::ErrorKind) -> Self {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.as_ref().to_path_buf(), kind);
        self
    }

    /// Returns the contents of a file, if present.
    #[must_use]
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.lock().get(path.as_ref()) {
            Some(Node::File(contents)) => Some(contents.clone()),
            _ => None,
        }
    }

    /// Returns every file path currently stored.
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        self.lock()
            .iter()
            .filter(|(_, node)| matches!(node, Node::File(_)))
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn insert(&self, path: &Path, node: Node) {
        let mut nodes = self.lock();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
        nodes.insert(path.to_path_buf(), node);
    }

    fn injected(&self, path: &Path) -> io::Result<()> {
        let failures = self.failures.lock().unwrap_or_else(PoisonError::into_inner);
        match failures.get(path) {
            Some(kind) => Err(io::Error::new(
                *kind,
                format!("injected failure: {}", path.display()),
            )),
            None => Ok(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Node>> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.injected(path)?;
        match self.lock().get(path) {
            Some(Node::File(contents)) => Ok(contents.clone()),
            Some(_) => Err(invalid("not a file", path)),
            None => Err(not_found(path)),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if matches!(self.lock().get(path), Some(Node::Dir)) {
            return Err(invalid("is a directory", path));
        }
        self.insert(path, Node::File(contents.to_string()));
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        self.injected(path)?;
        let nodes = self.lock();
        match nodes.get(path) {
            Some(Node::Dir) => {}
            Some(_) => return Err(invalid("not a directory", path)),
            None => return Err(not_found(path)),
        }
        // BTreeMap iteration keeps the names sorted.
        Ok(nodes
            .keys()
            .filter(|k| k.parent() == Some(path))
            .filter_map(|k| k.file_name().map(ToOwned::to_owned))
            .collect())
    }

    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        match self.lock().get(path) {
            Some(Node::File(_)) => Ok(EntryKind::File),
            Some(Node::Dir) => Ok(EntryKind::Dir),
            Some(Node::Symlink) => Ok(EntryKind::Symlink),
            None => Err(not_found(path)),
        }
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.injected(path)?;
        let mut nodes = self.lock();
        match nodes.remove(path) {
            Some(Node::File(_) | Node::Symlink) => Ok(()),
            Some(node @ Node::Dir) => {
                nodes.insert(path.to_path_buf(), node);
                Err(invalid("is a directory", path))
            }
            None => Err(not_found(path)),
        }
    }
}
