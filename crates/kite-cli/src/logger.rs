//! Logging setup for the Kite CLI.
//!
//! The `kite` target prefix covers every kite crate. Verbosity is chosen in
//! this order:
//! 1. `--verbose`: debug for kite crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG` when set
//! 4. info for kite crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "kite=debug";
const QUIET_FILTER: &str = "kite=error";
const DEFAULT_FILTER: &str = "kite=info";

/// Pick the filter directives for the given flags.
pub fn filter_directives(verbose: bool, quiet: bool) -> Option<&'static str> {
    if verbose {
        Some(VERBOSE_FILTER)
    } else if quiet {
        Some(QUIET_FILTER)
    } else {
        None
    }
}

/// Install the global tracing subscriber. Call once, before any logging.
///
/// Logs go to stderr so JSON or summaries on stdout stay clean.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = match filter_directives(verbose, quiet) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };
    init_logger_with_filter(filter, no_color);
}

/// Install the global subscriber with a custom filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second install (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_wins_over_quiet() {
        assert_eq!(filter_directives(true, true), Some(VERBOSE_FILTER));
    }

    #[test]
    fn test_quiet_filter() {
        assert_eq!(filter_directives(false, true), Some(QUIET_FILTER));
    }

    #[test]
    fn test_default_defers_to_environment() {
        assert_eq!(filter_directives(false, false), None);
    }

    #[test]
    fn test_filters_parse() {
        for directives in [VERBOSE_FILTER, QUIET_FILTER, DEFAULT_FILTER] {
            let _ = EnvFilter::new(directives);
        }
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
