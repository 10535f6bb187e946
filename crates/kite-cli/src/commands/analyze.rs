//! `kite analyze`: run the pipeline on one package and report it.

use std::time::Instant;

use kite_graph::{Analyzer, AnalysisResult, GraphSink, JsonFileSink};
use tracing::{debug, warn};

use crate::cli::AnalyzeArgs;
use crate::config::KiteConfig;
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the analyze command.
///
/// Only fatal analysis errors fail the command. Files that could not be
/// extracted are listed as warnings.
pub async fn execute(args: AnalyzeArgs, quiet: bool) -> Result<()> {
    let config = KiteConfig::load(&args)?;
    debug!(?config, "resolved configuration");

    let started = Instant::now();
    let result = run(&args, &config).await?;
    let elapsed = started.elapsed();

    for path in &result.failed_files {
        warn!("could not extract {path}");
    }

    if !quiet {
        ui::print_summary(&result, elapsed);
    }

    if let Some(out) = &config.out {
        let out = if out.is_relative() {
            std::env::current_dir()
                .context("cannot resolve the working directory")?
                .join(out)
        } else {
            out.clone()
        };
        if let Some(parent) = out.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.with_path(parent)?;
        }

        let report = JsonFileSink::new(&out).write(&result).await?;
        if !quiet {
            ui::success(&format!(
                "Wrote {} records to {}",
                report.inserted,
                out.display()
            ));
        }
    }

    Ok(())
}

/// Analyze the package with the merged configuration.
pub async fn run(args: &AnalyzeArgs, config: &KiteConfig) -> Result<AnalysisResult> {
    let result = Analyzer::new(&args.root)
        .config(config.analyzer_config())
        .analyze()
        .await?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn package(temp: &TempDir) {
        fs::write(
            temp.path().join("package.json"),
            r#"{ "name": "demo", "version": "1.0.0" }"#,
        )
        .unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(
            temp.path().join("src/base.ts"),
            "export class Base { greet(): string { return 'hi'; } }",
        )
        .unwrap();
        fs::write(
            temp.path().join("src/child.ts"),
            "import { Base } from './base';\nexport class Child extends Base {}",
        )
        .unwrap();
    }

    fn args(temp: &TempDir) -> AnalyzeArgs {
        AnalyzeArgs {
            root: temp.path().to_path_buf(),
            out: None,
            concurrency: Some(2),
            no_project_config: false,
            config: None,
        }
    }

    #[tokio::test]
    async fn test_run_uses_merged_config() {
        let temp = TempDir::new().unwrap();
        package(&temp);

        let args = args(&temp);
        let config = KiteConfig {
            concurrency: 2,
            ..KiteConfig::default()
        };
        let result = run(&args, &config).await.unwrap();

        assert_eq!(result.package.name, "demo");
        assert_eq!(result.modules.len(), 2);
        assert_eq!(result.report.class_extends.resolved, 1);
    }

    #[tokio::test]
    async fn test_execute_writes_json() {
        let temp = TempDir::new().unwrap();
        package(&temp);
        let out = temp.path().join("out/graph.json");

        let mut args = args(&temp);
        args.out = Some(out.clone());
        execute(args, true).await.unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["package"]["name"], "demo");
        assert_eq!(written["classes"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let mut args = args(&temp);
        args.root = temp.path().join("missing");
        assert!(execute(args, true).await.is_err());
    }
}
