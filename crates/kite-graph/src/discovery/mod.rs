//! Source file discovery.
//!
//! Finds the analyzable files of a package: the union of the project
//! configuration's include roots and computed file list when a
//! `tsconfig.json` is present, a full traversal otherwise. Either way the
//! same filters apply and the result is deduplicated and sorted.

mod project_config;

pub use project_config::{
    FileMatcher, IncludeRoots, PROJECT_CONFIG_FILE, ProjectConfig, ProjectConfigError,
    strip_json_comments, strip_trailing_commas,
};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::analysis::AnalyzerConfig;
use crate::error::{AnalyzeError, Result};

/// Suffixes of declaration-only files.
const DECLARATION_SUFFIXES: &[&str] = &[".d.ts", ".d.mts", ".d.cts"];

/// How the file list was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscoveryStrategy {
    ProjectConfig,
    Traversal,
}

#[derive(Debug, Clone)]
pub struct DiscoveredFiles {
    pub root: PathBuf,
    /// Absolute paths, sorted and unique
    pub files: Vec<PathBuf>,
    pub strategy: DiscoveryStrategy,
}

/// Discover the source files of the package at `root`.
///
/// A malformed `tsconfig.json` is logged and ignored. Failing to read the
/// root itself is fatal.
pub fn discover(root: &Path, config: &AnalyzerConfig) -> Result<DiscoveredFiles> {
    let root = root.to_path_buf().clean();
    if !root.is_dir() {
        return Err(AnalyzeError::Discovery {
            root,
            message: "not a readable directory".to_string(),
        });
    }
    let mut files = BTreeSet::new();

    let project_config = if config.use_project_config {
        load_project_config(&root)
    } else {
        None
    };

    let strategy = match project_config {
        Some(project) => {
            let roots = project.include_roots(&root);
            for dir in &roots.directories {
                walk(dir, &root, config, &mut files)?;
            }
            for file in &roots.files {
                add_explicit(file, &root, config, &mut files);
            }

            match project.file_matcher(&root) {
                Ok(matcher) => collect_matching(&matcher, &root, config, &mut files)?,
                Err(e) => warn!("Ignoring computed file list of {}: {}", PROJECT_CONFIG_FILE, e),
            }
            DiscoveryStrategy::ProjectConfig
        }
        None => {
            walk(&root, &root, config, &mut files)?;
            DiscoveryStrategy::Traversal
        }
    };

    debug!(
        "Discovered {} files under {} ({:?})",
        files.len(),
        root.display(),
        strategy
    );

    Ok(DiscoveredFiles {
        root,
        files: files.into_iter().collect(),
        strategy,
    })
}

fn load_project_config(root: &Path) -> Option<ProjectConfig> {
    let path = root.join(PROJECT_CONFIG_FILE);
    if !path.is_file() {
        return None;
    }
    match ProjectConfig::load(&path) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Falling back to traversal, {} is unusable: {}", path.display(), e);
            None
        }
    }
}

/// Recursively collect accepted files below `dir`.
fn walk(
    dir: &Path,
    package_root: &Path,
    config: &AnalyzerConfig,
    out: &mut BTreeSet<PathBuf>,
) -> Result<()> {
    let dir = dir.to_path_buf().clean();
    if !dir.starts_with(package_root) {
        debug!("Skipping include root outside the package: {}", dir.display());
        return Ok(());
    }
    if !dir.is_dir() {
        debug!("Skipping missing include root: {}", dir.display());
        return Ok(());
    }

    let walker = WalkDir::new(&dir).follow_links(false).into_iter();
    let entries = walker.filter_entry(|e| {
        e.depth() == 0
            || !e.file_type().is_dir()
            || !config.is_excluded_dir(&e.file_name().to_string_lossy())
    });
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(AnalyzeError::Discovery {
                    root: dir.clone(),
                    message: e.to_string(),
                });
            }
            Err(e) => {
                warn!("Skipping unreadable path during discovery: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && accepts_file(entry.path(), package_root, config) {
            out.insert(entry.path().to_path_buf());
        }
    }
    Ok(())
}

fn add_explicit(
    file: &Path,
    package_root: &Path,
    config: &AnalyzerConfig,
    out: &mut BTreeSet<PathBuf>,
) {
    let file = file.to_path_buf().clean();
    if file.is_file() && accepts_file(&file, package_root, config) {
        out.insert(file);
    }
}

/// Files of the project configuration's computed list.
fn collect_matching(
    matcher: &FileMatcher,
    package_root: &Path,
    config: &AnalyzerConfig,
    out: &mut BTreeSet<PathBuf>,
) -> Result<()> {
    let mut candidates = BTreeSet::new();
    walk(package_root, package_root, config, &mut candidates)?;

    for path in candidates {
        if let Some(relative) = relative_path(&path, package_root)
            && matcher.matches(&relative)
        {
            out.insert(path);
        }
    }
    for file in &matcher.files {
        add_explicit(file, package_root, config, out);
    }
    Ok(())
}

/// Extension, declaration-file, containment and exclusion filters.
pub fn accepts_file(path: &Path, package_root: &Path, config: &AnalyzerConfig) -> bool {
    let Some(relative) = path.strip_prefix(package_root).ok() else {
        return false;
    };

    let Some(file_name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    if DECLARATION_SUFFIXES.iter().any(|s| file_name.ends_with(s)) {
        return false;
    }

    let supported = path
        .extension()
        .map(|ext| config.is_supported_extension(&ext.to_string_lossy()))
        .unwrap_or(false);
    if !supported {
        return false;
    }

    // Explicit entries can point into excluded directories
    relative.parent().is_none_or(|parent| {
        !parent
            .components()
            .any(|c| config.is_excluded_dir(&c.as_os_str().to_string_lossy()))
    })
}

/// Path relative to `root` with forward slashes.
pub fn relative_path(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
