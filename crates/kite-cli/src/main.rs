//! Kite CLI entry point.
//!
//! Parses arguments, installs logging and dispatches the command.

use clap::Parser;
use kite_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Analyze(analyze_args) => {
            commands::analyze_execute(analyze_args, args.quiet).await
        }
    };

    result.map_err(error::cli_error_to_miette)
}
