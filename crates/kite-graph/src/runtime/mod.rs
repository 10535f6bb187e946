//! File-system abstraction used by the analysis pipeline.
//!
//! Extraction reads every source file through a [`Runtime`] so callers can
//! swap the OS file system for an overlay (unsaved editor buffers, fixtures).
//! Discovery still walks the native file system directly.

pub mod native;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub use native::NativeRuntime;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Runtime error: {0}")]
    Other(String),
}

/// File metadata
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// File size in bytes
    pub size: u64,
    pub is_dir: bool,
    pub is_file: bool,
    /// Last modified timestamp (milliseconds since epoch)
    pub modified: Option<u64>,
}

/// Platform runtime trait.
///
/// Implementations must be shareable across the extraction workers, so the
/// pipeline holds them as `Arc<dyn Runtime>`.
#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file's raw bytes.
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata>;

    fn exists(&self, path: &Path) -> bool;
}
