//! Entity records produced by the analysis.
//!
//! All records are plain owned data. They are created once per analysis run
//! and never mutated after the pipeline returns.

mod declarations;
mod imports;
mod package;
mod relations;

pub use declarations::{
    Class, Enum, Function, Interface, Method, MethodKind, Module, ModuleSource, Parameter,
    ParentType, Property, TypeAlias, Variable, VariableKind, Visibility,
};
pub use imports::{Export, Import, ImportSpecifier, SpecifierKind};
pub use package::{DependencyType, Package, PackageImport};
pub use relations::{
    ClassExtendsRef, ClassImplementsRef, InterfaceExtendsRef, Qualifier, ResolutionStatus,
    SourceSymbolType, SymbolReference, SymbolUsageRef, TargetKind,
};

use crate::id::EntityId;

/// Anything with a stable id. Used for id-based deduplication and upserts.
pub trait HasId {
    fn id(&self) -> EntityId;
}

macro_rules! impl_has_id {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HasId for $ty {
                fn id(&self) -> EntityId {
                    self.id
                }
            }
        )*
    };
}

impl_has_id!(
    Package,
    PackageImport,
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
    ClassExtendsRef,
    ClassImplementsRef,
    InterfaceExtendsRef,
    SymbolUsageRef,
    SymbolReference,
);

/// Keep the first record for every id, preserving order.
pub fn dedup_by_id<T: HasId>(items: Vec<T>) -> Vec<T> {
    let mut seen = rustc_hash::FxHashSet::default();
    items
        .into_iter()
        .filter(|item| seen.insert(item.id()))
        .collect()
}
