//! Native runtime over `std::fs`.

use async_trait::async_trait;
use std::path::Path;
use tokio::task;

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// Native filesystem runtime.
///
/// Blocking `std::fs` calls run on tokio's blocking pool so they never stall
/// the extraction workers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    pub fn new() -> Self {
        Self
    }
}

fn io_error(path: &Path, action: &str, e: std::io::Error) -> RuntimeError {
    if e.kind() == std::io::ErrorKind::NotFound {
        RuntimeError::FileNotFound(path.to_path_buf())
    } else {
        RuntimeError::Io(format!("Failed to {action} {}: {e}", path.display()))
    }
}

#[async_trait]
impl Runtime for NativeRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        let path = path.to_path_buf();

        task::spawn_blocking(move || std::fs::read(&path).map_err(|e| io_error(&path, "read", e)))
            .await
            .map_err(|e| RuntimeError::Other(format!("Task join error: {e}")))?
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        let path = path.to_path_buf();

        task::spawn_blocking(move || {
            let metadata =
                std::fs::metadata(&path).map_err(|e| io_error(&path, "get metadata for", e))?;

            let modified = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_millis() as u64);

            Ok(FileMetadata {
                size: metadata.len(),
                is_dir: metadata.is_dir(),
                is_file: metadata.is_file(),
                modified,
            })
        })
        .await
        .map_err(|e| RuntimeError::Other(format!("Task join error: {e}")))?
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_file_and_metadata() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.ts");
        std::fs::write(&file, b"export const a = 1;").unwrap();

        let runtime = NativeRuntime::new();
        assert!(runtime.exists(&file));
        assert_eq!(runtime.read_file(&file).await.unwrap(), b"export const a = 1;");

        let meta = runtime.metadata(&file).await.unwrap();
        assert!(meta.is_file);
        assert_eq!(meta.size, 19);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.ts");

        let err = NativeRuntime.read_file(&missing).await.unwrap_err();
        assert!(matches!(err, RuntimeError::FileNotFound(p) if p == missing));
    }
}
