use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// How a name is brought in by an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecifierKind {
    Value,
    Type,
    Default,
    Namespace,
    SideEffect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpecifier {
    /// Imported name (`default` / `*` for default and namespace imports,
    /// empty for side-effect imports)
    pub name: String,
    /// Local binding when it differs from `name`
    pub alias: Option<String>,
    pub kind: SpecifierKind,
}

/// One import declaration of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    /// Specifier exactly as written (`./user`, `@scope/pkg/sub`)
    pub source: String,
    pub is_relative: bool,
    /// Bare package name for non-relative sources
    pub package_name: Option<String>,
    /// Module the source resolves to inside this package
    pub target_module_id: Option<EntityId>,
    /// Declared dependency the source belongs to
    pub target_package_id: Option<EntityId>,
    pub is_type_only: bool,
    pub specifiers: Vec<ImportSpecifier>,
}

/// One exported name of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Export {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    /// Exported name; `default` for default exports, `*` for wildcard re-exports
    pub name: String,
    /// Local binding when it differs from the exported name
    pub local_name: Option<String>,
    pub is_default: bool,
    /// Source module for re-exports
    pub source: Option<String>,
}
