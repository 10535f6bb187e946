use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// The analyzed package. Root of the `package_id` namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: EntityId,
    pub name: String,
    pub version: String,
    pub path: PathBuf,
    /// Dependency name → package id of the resolved version.
    pub dependencies: IndexMap<String, EntityId>,
    pub dev_dependencies: IndexMap<String, EntityId>,
    pub peer_dependencies: IndexMap<String, EntityId>,
}

/// Type of dependency in package.json.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyType {
    /// Regular dependencies (optional dependencies are folded in here)
    Production,
    /// Development dependencies
    Development,
    /// Peer dependencies
    Peer,
}

impl DependencyType {
    /// Manifest field name for the dependency type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "dependencies",
            Self::Development => "devDependencies",
            Self::Peer => "peerDependencies",
        }
    }
}

/// Placeholder for a dependency package. It is never traversed; it exists so
/// dependency edges point at a concrete record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageImport {
    pub id: EntityId,
    pub name: String,
    /// Range as written in the manifest
    pub declared_version: String,
    /// Version pinned by the lockfile, or the declared range when unknown
    pub resolved_version: String,
    pub dependency_type: DependencyType,
    pub depth: u32,
    pub traversed: bool,
}
