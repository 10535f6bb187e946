//! Persistence sinks for finished graphs.
//!
//! A sink accepts batched upserts keyed by id. Writing an id that is already
//! present is a no-op, so the same package can be written repeatedly (or in
//! append mode, file subset by file subset) without duplicating records.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::AnalysisResult;
use crate::id::EntityId;
use crate::model::{
    Class, ClassExtendsRef, ClassImplementsRef, Enum, Export, Function, HasId, Import, Interface,
    InterfaceExtendsRef, Method, Module, Package, PackageImport, Parameter, Property,
    SymbolReference, TypeAlias, Variable,
};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Outcome of one batch write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteReport {
    pub inserted: usize,
    /// Records whose id was already stored
    pub skipped: usize,
}

impl WriteReport {
    fn merge(&mut self, other: WriteReport) {
        self.inserted += other.inserted;
        self.skipped += other.skipped;
    }
}

#[async_trait]
pub trait GraphSink: Send + Sync {
    async fn write(&self, result: &AnalysisResult) -> Result<WriteReport, SinkError>;
}

/// Records of one kind, keyed by id in first-write order.
#[derive(Debug)]
struct Table<T> {
    rows: IndexMap<EntityId, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: IndexMap::new(),
        }
    }
}

impl<T: HasId + Clone> Table<T> {
    fn upsert(&mut self, records: &[T]) -> WriteReport {
        let mut report = WriteReport::default();
        for record in records {
            if self.rows.contains_key(&record.id()) {
                report.skipped += 1;
            } else {
                self.rows.insert(record.id(), record.clone());
                report.inserted += 1;
            }
        }
        report
    }
}

#[derive(Debug, Default)]
struct Store {
    packages: Table<Package>,
    package_imports: Table<PackageImport>,
    modules: Table<Module>,
    classes: Table<Class>,
    interfaces: Table<Interface>,
    methods: Table<Method>,
    properties: Table<Property>,
    parameters: Table<Parameter>,
    functions: Table<Function>,
    type_aliases: Table<TypeAlias>,
    enums: Table<Enum>,
    variables: Table<Variable>,
    imports: Table<Import>,
    exports: Table<Export>,
    class_extends: Table<ClassExtendsRef>,
    class_implements: Table<ClassImplementsRef>,
    interface_extends: Table<InterfaceExtendsRef>,
    symbol_references: Table<SymbolReference>,
}

/// Classes and interfaces declared in one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDeclarations {
    pub classes: Vec<Class>,
    pub interfaces: Vec<Interface>,
}

/// In-memory id-keyed store.
#[derive(Debug, Default)]
pub struct MemorySink {
    store: RwLock<Store>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point lookup of the types a module declares.
    pub fn module_declarations(&self, module_id: EntityId) -> ModuleDeclarations {
        let store = self.store.read();
        ModuleDeclarations {
            classes: store
                .classes
                .rows
                .values()
                .filter(|c| c.module_id == module_id)
                .cloned()
                .collect(),
            interfaces: store
                .interfaces
                .rows
                .values()
                .filter(|i| i.module_id == module_id)
                .cloned()
                .collect(),
        }
    }

    pub fn module_count(&self) -> usize {
        self.store.read().modules.rows.len()
    }

    pub fn class_count(&self) -> usize {
        self.store.read().classes.rows.len()
    }

    pub fn symbol_reference_count(&self) -> usize {
        self.store.read().symbol_references.rows.len()
    }
}

#[async_trait]
impl GraphSink for MemorySink {
    async fn write(&self, result: &AnalysisResult) -> Result<WriteReport, SinkError> {
        let mut store = self.store.write();
        let mut report = store.packages.upsert(std::slice::from_ref(&result.package));

        report.merge(store.package_imports.upsert(&result.package_imports));
        report.merge(store.modules.upsert(&result.modules));
        report.merge(store.classes.upsert(&result.classes));
        report.merge(store.interfaces.upsert(&result.interfaces));
        report.merge(store.methods.upsert(&result.methods));
        report.merge(store.properties.upsert(&result.properties));
        report.merge(store.parameters.upsert(&result.parameters));
        report.merge(store.functions.upsert(&result.functions));
        report.merge(store.type_aliases.upsert(&result.type_aliases));
        report.merge(store.enums.upsert(&result.enums));
        report.merge(store.variables.upsert(&result.variables));
        report.merge(store.imports.upsert(&result.imports));
        report.merge(store.exports.upsert(&result.exports));
        report.merge(store.class_extends.upsert(&result.class_extends));
        report.merge(store.class_implements.upsert(&result.class_implements));
        report.merge(store.interface_extends.upsert(&result.interface_extends));
        report.merge(store.symbol_references.upsert(&result.symbol_references));

        debug!(
            "memory sink: {} inserted, {} skipped",
            report.inserted, report.skipped
        );
        Ok(report)
    }
}

/// Writes the whole result as pretty-printed JSON, replacing the file.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl GraphSink for JsonFileSink {
    async fn write(&self, result: &AnalysisResult) -> Result<WriteReport, SinkError> {
        let json = serde_json::to_vec_pretty(result)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| SinkError::Io {
                path: self.path.clone(),
                source,
            })?;

        let stats = result.stats();
        let inserted = 1 + stats.files + stats.entity_counts().iter().map(|(_, n)| n).sum::<usize>()
            + result.class_extends.len()
            + result.class_implements.len()
            + result.interface_extends.len();
        Ok(WriteReport {
            inserted,
            skipped: 0,
        })
    }
}
