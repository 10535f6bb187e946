use std::path::PathBuf;

use crate::runtime::RuntimeError;

/// Result type for the analysis pipeline.
pub type Result<T> = std::result::Result<T, AnalyzeError>;

/// Fatal errors: anything that stops a whole package from being analyzed.
///
/// Per-file problems never surface here; they downgrade the file to an empty
/// module record instead.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("package root not found: {0}")]
    PackageRootNotFound(PathBuf),

    #[error("package root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("invalid manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    #[error("file discovery failed under {root}: {message}")]
    Discovery { root: PathBuf, message: String },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
