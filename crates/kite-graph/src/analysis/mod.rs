//! Package analysis: configuration, the pipeline and its result.

mod analyzer;
mod config;
mod linking;
mod result;

pub use analyzer::{Analyzer, analyze, analyze_with_config};
pub use config::{
    AnalyzerConfig, DEFAULT_EXCLUDED_DIRS, DEFAULT_EXTENSIONS, DEFAULT_MAX_FILE_SIZE,
    default_concurrency,
};
pub use linking::{ModuleLocator, link_imports};
pub use result::{AnalysisResult, AnalysisStats};
