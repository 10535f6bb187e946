use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::{AnalysisResult, Analyzer};

/// A package directory that lives for the duration of a test.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// Empty package with a minimal manifest.
    pub fn package(name: &str) -> Self {
        let fixture = Self {
            dir: TempDir::new().unwrap(),
        };
        fixture.file(
            "package.json",
            &format!(r#"{{ "name": "{name}", "version": "1.0.0" }}"#),
        );
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn file(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    pub fn analyzer(&self) -> Analyzer {
        Analyzer::new(self.root()).concurrency(2)
    }

    pub async fn analyze(&self) -> AnalysisResult {
        self.analyzer().analyze().await.unwrap()
    }
}

/// Relative paths of the analyzed modules, in result order.
pub fn module_paths(result: &AnalysisResult) -> Vec<&str> {
    result
        .modules
        .iter()
        .map(|m| m.source.relative_path.as_str())
        .collect()
}
