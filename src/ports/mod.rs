//! Port traits defining external boundaries.
//!
//! The only external system this tool touches is the filesystem.
//! Implementations live in `src/adapters/`.

pub mod filesystem;

pub use filesystem::{EntryKind, FileSystem};
