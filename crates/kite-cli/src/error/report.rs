//! Conversion of CLI errors into miette reports.

use kite_graph::AnalyzeError;
use miette::Report;

use crate::error::CliError;

pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Analyze(e) => analyze_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

pub fn analyze_error_to_miette(err: AnalyzeError) -> Report {
    match err {
        AnalyzeError::PackageRootNotFound(path) => miette::miette!(
            "Package root not found: {}\n\nHint: Pass the directory that contains package.json",
            path.display()
        ),
        AnalyzeError::NotADirectory(path) => miette::miette!(
            "Package root is not a directory: {}\n\nHint: Pass the package directory, not a file inside it",
            path.display()
        ),
        AnalyzeError::InvalidManifest { path, message } => miette::miette!(
            "Invalid package.json at {}: {}\n\nHint: Use a JSON validator to check syntax",
            path.display(),
            message
        ),
        other => miette::miette!("Analysis failed: {}", other),
    }
}
