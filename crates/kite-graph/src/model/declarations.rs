use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// Where a module lives inside its package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSource {
    /// Directory relative to the package root ("" for the root itself)
    pub directory: String,
    pub filename: String,
    /// Path relative to the package root, always with `/` separators
    pub relative_path: String,
    /// Set when the file is an `index.*` file of its directory
    pub index_file: Option<String>,
    pub is_barrel: bool,
}

/// One source file. Identity depends only on package id and relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: EntityId,
    pub package_id: EntityId,
    pub name: String,
    pub source: ModuleSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// Declaration owning a method or property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentType {
    Class,
    Interface,
}

impl ParentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    pub name: String,
    /// Filled from the resolved extends reference once the package is resolved
    pub extends_id: Option<EntityId>,
    pub is_exported: bool,
    pub is_abstract: bool,
    pub type_parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    pub name: String,
    pub is_exported: bool,
    pub type_parameters: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Method,
    Constructor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    pub parent_id: EntityId,
    pub parent_type: ParentType,
    pub name: String,
    pub kind: MethodKind,
    pub return_type: String,
    pub is_static: bool,
    pub is_async: bool,
    pub is_abstract: bool,
    pub is_optional: bool,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    pub parent_id: EntityId,
    pub parent_type: ParentType,
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub is_static: bool,
    pub is_readonly: bool,
    pub is_optional: bool,
    pub is_accessor: bool,
    pub visibility: Visibility,
}

/// Parameter of a method or of a module-level function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    /// Owning method (or function) id
    pub method_id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub position: usize,
    pub is_optional: bool,
    pub is_rest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    pub name: String,
    pub return_type: String,
    pub type_parameters: Vec<String>,
    pub is_async: bool,
    pub is_generator: bool,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAlias {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub type_parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    pub name: String,
    pub members: Vec<String>,
    pub is_const: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Const,
    Let,
    Var,
    Using,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    pub name: String,
    pub kind: VariableKind,
    #[serde(rename = "type")]
    pub type_text: String,
}
