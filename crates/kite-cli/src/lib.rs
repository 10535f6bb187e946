//! Kite CLI - entity graphs for TypeScript, JavaScript and Vue packages.
//!
//! A thin shell over [`kite_graph`]. It owns argument parsing, layered
//! configuration, logging setup and terminal reporting. All analysis
//! semantics live in the library.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`config`] - figment layering of defaults, config file, environment and flags
//! - [`commands`] - command implementations
//! - [`error`] - typed errors rendered through miette
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - terminal output helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use kite_cli::logger;
//!
//! logger::init_logger(false, false, false);
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result};
