use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// Outcome of resolving a deferred reference by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionStatus {
    /// Not looked at yet, or no candidate matched
    #[default]
    Unresolved,
    Resolved,
    /// Two or more candidates share the name; none is picked
    Ambiguous,
    /// The only candidate was the owning entity itself
    SelfReference,
}

impl ResolutionStatus {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved)
    }
}

/// `class Child extends Parent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassExtendsRef {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    pub class_id: EntityId,
    pub parent_name: String,
    pub parent_id: Option<EntityId>,
    pub status: ResolutionStatus,
}

/// `class C implements I`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassImplementsRef {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    pub class_id: EntityId,
    pub interface_name: String,
    pub interface_id: Option<EntityId>,
    pub status: ResolutionStatus,
}

/// `interface A extends B`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceExtendsRef {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    pub interface_id: EntityId,
    pub extended_name: String,
    pub extended_id: Option<EntityId>,
    pub status: ResolutionStatus,
}

/// What kind of member an access points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Method,
    Property,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Property => "property",
        }
    }
}

/// Declaration whose body contains a member access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSymbolType {
    Method,
    Function,
}

/// Object an access is made through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "name")]
pub enum Qualifier {
    /// `this.x`
    This,
    /// `service.x`
    Identifier(String),
}

impl Qualifier {
    /// Text used in composite keys and for display.
    pub fn as_str(&self) -> &str {
        match self {
            Self::This => "this",
            Self::Identifier(name) => name,
        }
    }
}

/// Raw member access found in a method or function body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolUsageRef {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    pub source_symbol_id: EntityId,
    pub source_symbol_type: SourceSymbolType,
    pub source_symbol_name: String,
    /// Class or interface enclosing the source symbol, if any
    pub source_parent_id: Option<EntityId>,
    pub target_kind: TargetKind,
    pub target_name: String,
    pub qualifier: Option<Qualifier>,
}

/// A usage resolved to a concrete method or property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolReference {
    pub id: EntityId,
    pub package_id: EntityId,
    pub module_id: EntityId,
    pub source_symbol_id: EntityId,
    pub source_symbol_type: SourceSymbolType,
    pub source_symbol_name: String,
    pub target_symbol_id: EntityId,
    pub target_kind: TargetKind,
    pub target_name: String,
    pub qualifier: Option<Qualifier>,
}
