//! In-memory adapters used by tests.

pub mod filesystem;

pub use filesystem::MemoryFileSystem;
