//! Error types for the Kite CLI.
//!
//! `CliError` is what commands return. Library errors convert into it
//! through `From`, and `main` renders it as a miette report.

mod report;

use std::path::PathBuf;

use thiserror::Error;

pub use report::cli_error_to_miette;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Fatal analysis failure (missing root, unreadable manifest, ...)
    #[error("Analysis failed: {0}")]
    Analyze(#[from] kite_graph::AnalyzeError),

    #[error("Failed to write output: {0}")]
    Sink(#[from] kite_graph::SinkError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

/// Errors while loading kite.config.json, the environment and flags.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}\n\nHint: Create a kite.config.json file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid configuration: {message}\n\nHint: Check kite.config.json syntax, KITE_* variables and field types")]
    Invalid { message: String },

    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Invalid {
            message: err.to_string(),
        }
    }
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Attach context to any error convertible into `CliError`.
pub trait ResultExt<T> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            CliError::Custom(format!("{}: {err}", path.as_ref().display()))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            CliError::Custom(format!("{msg}: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_not_found() {
        let err = ConfigError::NotFound(PathBuf::from("missing.json"));
        let msg = err.to_string();
        assert!(msg.contains("missing.json"));
        assert!(msg.contains("Hint"));
    }

    #[test]
    fn test_cli_error_from_config_error() {
        let err: CliError = ConfigError::Invalid {
            message: "bad".into(),
        }
        .into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_cli_error_from_analyze_error() {
        let err: CliError =
            kite_graph::AnalyzeError::PackageRootNotFound(PathBuf::from("/nope")).into();
        assert!(matches!(err, CliError::Analyze(_)));
        assert!(err.to_string().contains("/nope"));
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let err = result.with_path("graph.json").unwrap_err();
        assert_eq!(err.to_string(), "graph.json: I/O error: gone");
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(CliError::Custom("inner".into()));
        let err = result.context("outer").unwrap_err();
        assert_eq!(err.to_string(), "outer: inner");
    }
}
