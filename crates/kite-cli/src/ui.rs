//! Terminal output for command results.
//!
//! Summaries go to stdout; status lines go to stderr next to the logs.

use std::time::Duration;

use console::style;
use kite_graph::{AnalysisResult, ResolutionCounts};

/// Apply `--no-color` and the `NO_COLOR` / `FORCE_COLOR` conventions.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}

pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::user_attended()
}

pub fn success(message: &str) {
    eprintln!("{} {}", style("✔").green().bold(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
}

/// Human-readable duration: `850ms`, `1.25s`, `2m 5s`.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else if millis < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// `3 resolved, 1 ambiguous, 0 unresolved`
pub fn format_counts(counts: &ResolutionCounts) -> String {
    format!(
        "{} resolved, {} ambiguous, {} unresolved",
        counts.resolved, counts.ambiguous, counts.unresolved
    )
}

pub fn print_summary(result: &AnalysisResult, elapsed: Duration) {
    let stats = result.stats();

    println!(
        "{} Analyzed {} in {}",
        style("✔").green().bold(),
        style(format!("{}@{}", result.package.name, result.package.version)).bold(),
        style(format_duration(elapsed)).dim()
    );
    println!(
        "  {} {} ({} failed, {:?} discovery)",
        style("files").dim(),
        style(stats.files).cyan(),
        stats.failed_files,
        result.strategy
    );
    for (label, count) in stats.entity_counts() {
        println!("  {} {}", style(label).dim(), style(count).cyan());
    }

    let report = &result.report;
    println!("{}", style("Resolution").bold());
    for (label, counts) in [
        ("class extends", &report.class_extends),
        ("class implements", &report.class_implements),
        ("interface extends", &report.interface_extends),
    ] {
        println!("  {} {}", style(label).dim(), format_counts(counts));
    }
    println!(
        "  {} {} of {} resolved, {} dropped",
        style("symbol usages").dim(),
        report.symbol_usages.resolved,
        report.symbol_usages.total,
        report.symbol_usages.dropped
    );

    if !result.is_complete() {
        warning(&format!(
            "{} file(s) could not be extracted; their modules are empty",
            stats.failed_files
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(850)), "850ms");
        assert_eq!(format_duration(Duration::from_millis(1250)), "1.25s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_format_counts() {
        let counts = ResolutionCounts {
            resolved: 3,
            ambiguous: 1,
            unresolved: 0,
        };
        assert_eq!(format_counts(&counts), "3 resolved, 1 ambiguous, 0 unresolved");
    }
}
