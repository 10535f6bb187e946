//! Command-line interface definition.
//!
//! - `kite analyze <ROOT>` - analyze one package and report the graph

mod commands;
mod validation;

use clap::Parser;

pub use commands::{AnalyzeArgs, Command};
pub use validation::parse_concurrency;

/// Kite - cross-referenced entity graphs for JS/TS packages
#[derive(Parser, Debug)]
#[command(
    name = "kite",
    version,
    about = "Build entity graphs of TypeScript, JavaScript and Vue packages",
    long_about = "Kite parses every source file of a package, records its declarations,\n\
                  imports and exports, and links classes, interfaces and members\n\
                  across files into a deterministic, id-keyed graph."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
