use serde::{Deserialize, Serialize};

/// Upper bound for the default worker count.
const MAX_DEFAULT_CONCURRENCY: usize = 8;

/// Default maximum size of a single source file (10MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Source extensions analyzed by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "mts", "cts", "vue"];

/// Directories skipped during discovery, in addition to any dot-directory.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "coverage",
    "out",
    "vendor",
    "bower_components",
    "jspm_packages",
    "tmp",
    "temp",
];

/// Tunables of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzerConfig {
    /// Number of extraction workers
    pub concurrency: usize,
    /// Supported source extensions, without the leading dot
    pub extensions: Vec<String>,
    /// Directory names never descended into
    pub excluded_dirs: Vec<String>,
    /// Honor tsconfig.json include/exclude/files when present
    pub use_project_config: bool,
    /// Files larger than this are recorded as failed modules
    pub max_file_size: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            use_project_config: true,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl AnalyzerConfig {
    /// Worker count actually used; never zero.
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }

    pub fn is_supported_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }

    /// Whether discovery should skip a directory with this name.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.excluded_dirs.iter().any(|d| d == name)
    }
}

/// `min(available cores, 8)`, at least one.
pub fn default_concurrency() -> usize {
    num_cpus::get().clamp(1, MAX_DEFAULT_CONCURRENCY)
}
