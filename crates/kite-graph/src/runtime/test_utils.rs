//! Test runtime: the native file system with in-memory overrides.

use async_trait::async_trait;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

use super::{FileMetadata, NativeRuntime, Runtime, RuntimeError, RuntimeResult};

/// Reads from disk unless a path has been overridden or marked unreadable.
#[derive(Debug, Default)]
pub struct TestRuntime {
    overrides: RwLock<FxHashMap<PathBuf, Vec<u8>>>,
    unreadable: RwLock<Vec<PathBuf>>,
}

impl TestRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `content` for `path` instead of the file on disk.
    pub fn set_file(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.overrides.write().insert(path.into(), content.into());
    }

    /// Make every read of `path` fail with an I/O error.
    pub fn fail_reads(&self, path: impl Into<PathBuf>) {
        self.unreadable.write().push(path.into());
    }
}

#[async_trait]
impl Runtime for TestRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        if self.unreadable.read().iter().any(|p| p == path) {
            return Err(RuntimeError::Io(format!("simulated failure reading {}", path.display())));
        }
        if let Some(content) = self.overrides.read().get(path) {
            return Ok(content.clone());
        }
        NativeRuntime.read_file(path).await
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        if let Some(content) = self.overrides.read().get(path) {
            return Ok(FileMetadata {
                size: content.len() as u64,
                is_dir: false,
                is_file: true,
                modified: None,
            });
        }
        NativeRuntime.metadata(path).await
    }

    fn exists(&self, path: &Path) -> bool {
        self.overrides.read().contains_key(path) || path.exists()
    }
}
