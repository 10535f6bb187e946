//! Manifest and lockfile reading.
//!
//! Turns `package.json` (plus `package-lock.json` when present) into the
//! package's dependency edges and one placeholder [`PackageImport`] per
//! distinct dependency.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{AnalyzeError, Result};
use crate::id::{EntityId, EntityKind, generate_id, keys};
use crate::model::{DependencyType, PackageImport};
use crate::runtime::{Runtime, RuntimeError, RuntimeResult};

/// Maximum allowed size for manifest and lockfile (10MB)
const MAX_MANIFEST_SIZE: u64 = 10 * 1024 * 1024;

/// Version used when the manifest declares none.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Parsed package.json, reduced to the fields the graph needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageJson {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: IndexMap<String, String>,
    #[serde(default, rename = "peerDependencies")]
    pub peer_dependencies: IndexMap<String, String>,
    #[serde(default, rename = "optionalDependencies")]
    pub optional_dependencies: IndexMap<String, String>,
    /// File path this was loaded from
    #[serde(skip)]
    pub path: PathBuf,
}

impl PackageJson {
    /// Load package.json through the runtime.
    ///
    /// Any failure is fatal for the package: without a manifest there is no
    /// package identity.
    pub async fn from_path(runtime: &dyn Runtime, path: &Path) -> Result<Self> {
        let bytes = read_bounded(runtime, path).await.map_err(|source| AnalyzeError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut pkg: PackageJson =
            serde_json::from_slice(&bytes).map_err(|e| AnalyzeError::InvalidManifest {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        pkg.path = path.to_path_buf();
        Ok(pkg)
    }

    /// Package name, falling back to the name of the directory holding the
    /// manifest.
    pub fn package_name(&self) -> String {
        self.name
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| {
                self.path
                    .parent()
                    .and_then(|dir| dir.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "unnamed".to_string())
    }

    pub fn package_version(&self) -> String {
        self.version
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string())
    }

    /// Declared dependencies of one type. Optional dependencies count as
    /// production dependencies.
    pub fn dependencies_of(&self, dep_type: DependencyType) -> Vec<(&str, &str)> {
        match dep_type {
            DependencyType::Production => {
                let mut deps = pairs(&self.dependencies);
                for (name, range) in &self.optional_dependencies {
                    if !self.dependencies.contains_key(name) {
                        deps.push((name.as_str(), range.as_str()));
                    }
                }
                deps
            }
            DependencyType::Development => pairs(&self.dev_dependencies),
            DependencyType::Peer => pairs(&self.peer_dependencies),
        }
    }
}

fn pairs(map: &IndexMap<String, String>) -> Vec<(&str, &str)> {
    map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LockEntry {
    version: Option<String>,
}

/// The parts of package-lock.json needed to pin versions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageLock {
    #[serde(default, rename = "lockfileVersion")]
    pub lockfile_version: Option<u32>,
    /// v2/v3 layout: `"node_modules/<name>"` → entry
    #[serde(default)]
    packages: IndexMap<String, LockEntry>,
    /// v1 layout: `<name>` → entry
    #[serde(default)]
    dependencies: IndexMap<String, LockEntry>,
}

impl PackageLock {
    /// Load a lockfile, treating absence or a parse failure as "no lockfile".
    pub async fn load(runtime: &dyn Runtime, path: &Path) -> Option<Self> {
        if !runtime.exists(path) {
            return None;
        }
        let bytes = match read_bounded(runtime, path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Ignoring unreadable lockfile {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(lock) => Some(lock),
            Err(e) => {
                warn!("Ignoring invalid lockfile {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn parse(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Locked version of a top-level dependency.
    pub fn resolved_version(&self, name: &str) -> Option<&str> {
        self.packages
            .get(&format!("node_modules/{name}"))
            .and_then(|entry| entry.version.as_deref())
            .or_else(|| {
                self.dependencies
                    .get(name)
                    .and_then(|entry| entry.version.as_deref())
            })
    }
}

/// Dependency edges of the analyzed package.
#[derive(Debug, Clone, Default)]
pub struct DependencyMetadata {
    pub dependencies: IndexMap<String, EntityId>,
    pub dev_dependencies: IndexMap<String, EntityId>,
    pub peer_dependencies: IndexMap<String, EntityId>,
    pub package_imports: Vec<PackageImport>,
}

impl DependencyMetadata {
    /// Package id of a declared dependency of any type.
    pub fn package_id_of(&self, name: &str) -> Option<EntityId> {
        self.dependencies
            .get(name)
            .or_else(|| self.dev_dependencies.get(name))
            .or_else(|| self.peer_dependencies.get(name))
            .copied()
    }
}

/// Map every declared dependency to the package id of its resolved version.
///
/// Without a lockfile entry the declared range doubles as the resolved
/// version.
pub fn read_dependencies(
    manifest: &PackageJson,
    lockfile: Option<&PackageLock>,
) -> DependencyMetadata {
    let mut metadata = DependencyMetadata::default();

    for dep_type in [
        DependencyType::Production,
        DependencyType::Development,
        DependencyType::Peer,
    ] {
        for (name, declared) in manifest.dependencies_of(dep_type) {
            let resolved = lockfile
                .and_then(|lock| lock.resolved_version(name))
                .unwrap_or(declared);
            let package_id = generate_id(EntityKind::Package, &keys::package(name, resolved));

            let edges = match dep_type {
                DependencyType::Production => &mut metadata.dependencies,
                DependencyType::Development => &mut metadata.dev_dependencies,
                DependencyType::Peer => &mut metadata.peer_dependencies,
            };
            edges.insert(name.to_string(), package_id);

            if metadata.package_imports.iter().any(|p| p.name == name) {
                continue;
            }
            metadata.package_imports.push(PackageImport {
                id: package_id,
                name: name.to_string(),
                declared_version: declared.to_string(),
                resolved_version: resolved.to_string(),
                dependency_type: dep_type,
                depth: 0,
                traversed: false,
            });
        }
    }

    debug!(
        "Read {} dependencies ({} production, {} dev, {} peer)",
        metadata.package_imports.len(),
        metadata.dependencies.len(),
        metadata.dev_dependencies.len(),
        metadata.peer_dependencies.len()
    );
    metadata
}

async fn read_bounded(runtime: &dyn Runtime, path: &Path) -> RuntimeResult<Vec<u8>> {
    let metadata = runtime.metadata(path).await?;
    if metadata.size > MAX_MANIFEST_SIZE {
        return Err(RuntimeError::Io(format!(
            "{} exceeds maximum size of {}MB",
            path.display(),
            MAX_MANIFEST_SIZE / 1024 / 1024
        )));
    }
    runtime.read_file(path).await
}

/// Extract the base package name from an npm import specifier.
///
/// ```
/// # use kite_graph::extract_package_name;
/// assert_eq!(extract_package_name("@babel/core/lib/index"), "@babel/core");
/// assert_eq!(extract_package_name("lodash/fp"), "lodash");
/// ```
pub fn extract_package_name(specifier: &str) -> &str {
    if specifier.starts_with('@') {
        if let Some(first_slash) = specifier.find('/')
            && let Some(second_slash) = specifier[first_slash + 1..].find('/')
        {
            return &specifier[..first_slash + 1 + second_slash];
        }
        return specifier;
    }

    match specifier.find('/') {
        Some(slash_idx) => &specifier[..slash_idx],
        None => specifier,
    }
}
