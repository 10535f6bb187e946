use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::validation::parse_concurrency;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a package and print a summary of its graph
    ///
    /// Discovers source files (honoring tsconfig.json unless disabled),
    /// extracts declarations, resolves inheritance and member usages, and
    /// optionally writes the full graph as JSON.
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Package root (the directory containing package.json)
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Write the analysis result as JSON to this file
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Number of files extracted in parallel
    #[arg(short = 'j', long, value_name = "N", value_parser = parse_concurrency)]
    pub concurrency: Option<usize>,

    /// Ignore tsconfig.json and walk the whole package directory
    #[arg(long)]
    pub no_project_config: bool,

    /// Path to a kite.config.json file
    ///
    /// Defaults to `kite.config.json` in the package root when present.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
