//! Layered configuration for `kite analyze`.
//!
//! Priority: CLI flags > `KITE_*` environment > config file > defaults

mod loading;
mod tests;
mod validation;

use std::path::PathBuf;

use kite_graph::AnalyzerConfig;
use serde::{Deserialize, Serialize};

pub use loading::{CONFIG_FILE_NAME, locate_config_file};

/// Contents of kite.config.json after all layers are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KiteConfig {
    pub concurrency: usize,
    /// Source extensions without the leading dot
    pub extensions: Vec<String>,
    pub excluded_dirs: Vec<String>,
    pub use_project_config: bool,
    pub max_file_size: u64,

    /// JSON output path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<PathBuf>,
}

impl Default for KiteConfig {
    fn default() -> Self {
        let analyzer = AnalyzerConfig::default();
        Self {
            concurrency: analyzer.concurrency,
            extensions: analyzer.extensions,
            excluded_dirs: analyzer.excluded_dirs,
            use_project_config: analyzer.use_project_config,
            max_file_size: analyzer.max_file_size,
            out: None,
        }
    }
}

impl KiteConfig {
    /// Library configuration for the analyzer.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            concurrency: self.concurrency,
            extensions: self.extensions.clone(),
            excluded_dirs: self.excluded_dirs.clone(),
            use_project_config: self.use_project_config,
            max_file_size: self.max_file_size,
        }
    }
}

/// Values given explicitly on the command line. Absent flags are skipped
/// when serialized so they never mask lower layers.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_project_config: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<PathBuf>,
}

impl From<&crate::cli::AnalyzeArgs> for FlagOverrides {
    fn from(args: &crate::cli::AnalyzeArgs) -> Self {
        Self {
            concurrency: args.concurrency,
            // The flag can only switch project config off.
            use_project_config: args.no_project_config.then_some(false),
            out: args.out.clone(),
        }
    }
}
