//! Content-addressed identities.
//!
//! Every entity in the graph is identified by a version-5 UUID derived from a
//! per-kind namespace and a composite key. The same inputs always produce the
//! same id, across processes and machines, which is what lets a persistence
//! sink treat re-insertion as a no-op and lets append-mode runs line up with
//! earlier ones.
//!
//! Composite keys are built with the helpers in [`keys`] so every caller
//! agrees on the exact format.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Root namespace all per-kind namespaces are derived from.
const ROOT_NAMESPACE: Uuid = Uuid::from_u128(0x6b69_7465_2d67_7261_7068_2d72_6f6f_7400);

/// Kind of entity an id belongs to. Each kind owns a distinct namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Package,
    Module,
    Class,
    Interface,
    Method,
    Property,
    Parameter,
    Function,
    TypeAlias,
    Enum,
    Variable,
    Import,
    Export,
    ClassExtends,
    ClassImplements,
    InterfaceExtends,
    SymbolUsage,
    SymbolReference,
}

impl EntityKind {
    /// Stable label hashed into this kind's namespace. Never change these.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Module => "module",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Method => "method",
            Self::Property => "property",
            Self::Parameter => "parameter",
            Self::Function => "function",
            Self::TypeAlias => "type_alias",
            Self::Enum => "enum",
            Self::Variable => "variable",
            Self::Import => "import",
            Self::Export => "export",
            Self::ClassExtends => "class_extends",
            Self::ClassImplements => "class_implements",
            Self::InterfaceExtends => "interface_extends",
            Self::SymbolUsage => "symbol_usage",
            Self::SymbolReference => "symbol_reference",
        }
    }

    /// Namespace UUID for this kind.
    pub fn namespace(&self) -> Uuid {
        Uuid::new_v5(&ROOT_NAMESPACE, self.as_str().as_bytes())
    }
}

/// Deterministic identifier of a graph entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for EntityId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Map `(kind, composite key)` to a stable id.
///
/// # Example
///
/// ```
/// use kite_graph::id::{generate_id, EntityKind};
///
/// let a = generate_id(EntityKind::Class, "pkg.mod.User");
/// let b = generate_id(EntityKind::Class, "pkg.mod.User");
/// let c = generate_id(EntityKind::Interface, "pkg.mod.User");
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// ```
pub fn generate_id(kind: EntityKind, composite_key: &str) -> EntityId {
    EntityId(Uuid::new_v5(&kind.namespace(), composite_key.as_bytes()))
}

/// Composite key builders, one per entity shape.
pub mod keys {
    use super::EntityId;

    pub fn package(name: &str, version: &str) -> String {
        format!("{name}@{version}")
    }

    pub fn module(package_id: &EntityId, relative_path: &str) -> String {
        format!("{package_id}.{relative_path}")
    }

    /// Module-scoped declarations: classes, interfaces, functions, type
    /// aliases, enums, variables and exports.
    pub fn module_scoped(package_id: &EntityId, module_id: &EntityId, name: &str) -> String {
        format!("{package_id}.{module_id}.{name}")
    }

    pub fn method(
        package_id: &EntityId,
        module_id: &EntityId,
        parent_id: &EntityId,
        parent_type: &str,
        name: &str,
    ) -> String {
        format!("{package_id}.{module_id}.{parent_id}.{parent_type}.{name}")
    }

    pub fn property(
        package_id: &EntityId,
        module_id: &EntityId,
        parent_id: &EntityId,
        parent_type: &str,
        name: &str,
        index: usize,
    ) -> String {
        format!("{package_id}.{module_id}.{parent_id}.{parent_type}.{name}_{index}")
    }

    pub fn parameter(
        package_id: &EntityId,
        module_id: &EntityId,
        owner_id: &EntityId,
        name: &str,
        position: usize,
    ) -> String {
        format!("{package_id}.{module_id}.{owner_id}.{name}_{position}")
    }

    pub fn import(package_id: &EntityId, module_id: &EntityId, source: &str) -> String {
        format!("{package_id}.{module_id}.{source}")
    }

    /// Deferred relationship, keyed by target name since the target id is
    /// not known yet.
    pub fn deferred(kind: &str, owner_id: &EntityId, target_name: &str) -> String {
        format!("{kind}:{owner_id}:{target_name}")
    }

    pub fn symbol_usage(
        source_id: &EntityId,
        target_kind: &str,
        qualifier: Option<&str>,
        target_name: &str,
    ) -> String {
        format!(
            "{source_id}:{target_kind}:{}:{target_name}",
            qualifier.unwrap_or("")
        )
    }

    pub fn symbol_reference(source_id: &EntityId, target_id: &EntityId, target_kind: &str) -> String {
        format!("{source_id}:{target_id}:symbol_{target_kind}")
    }
}
