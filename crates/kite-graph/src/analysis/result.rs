use std::fmt;

use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveryStrategy;
use crate::error::Result;
use crate::model::{
    Class, ClassExtendsRef, ClassImplementsRef, Enum, Export, Function, Import, Interface,
    InterfaceExtendsRef, Method, Module, Package, PackageImport, Parameter, Property,
    SymbolReference, TypeAlias, Variable,
};
use crate::resolve::ResolutionReport;

/// The finished, deduplicated graph of one package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub package: Package,
    pub package_imports: Vec<PackageImport>,
    pub modules: Vec<Module>,
    pub classes: Vec<Class>,
    pub interfaces: Vec<Interface>,
    pub methods: Vec<Method>,
    pub properties: Vec<Property>,
    pub parameters: Vec<Parameter>,
    pub functions: Vec<Function>,
    pub type_aliases: Vec<TypeAlias>,
    pub enums: Vec<Enum>,
    pub variables: Vec<Variable>,
    pub imports: Vec<Import>,
    pub exports: Vec<Export>,
    pub class_extends: Vec<ClassExtendsRef>,
    pub class_implements: Vec<ClassImplementsRef>,
    pub interface_extends: Vec<InterfaceExtendsRef>,
    pub symbol_references: Vec<SymbolReference>,
    pub report: ResolutionReport,
    pub strategy: DiscoveryStrategy,
    /// Relative paths of files that degraded to bare module records
    pub failed_files: Vec<String>,
}

/// Counts for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub files: usize,
    pub failed_files: usize,
    pub package_imports: usize,
    pub classes: usize,
    pub interfaces: usize,
    pub methods: usize,
    pub properties: usize,
    pub parameters: usize,
    pub functions: usize,
    pub type_aliases: usize,
    pub enums: usize,
    pub variables: usize,
    pub imports: usize,
    pub exports: usize,
    pub symbol_references: usize,
}

impl AnalysisStats {
    /// Per-kind counts in display order.
    pub fn entity_counts(&self) -> [(&'static str, usize); 13] {
        [
            ("package imports", self.package_imports),
            ("classes", self.classes),
            ("interfaces", self.interfaces),
            ("methods", self.methods),
            ("properties", self.properties),
            ("parameters", self.parameters),
            ("functions", self.functions),
            ("type aliases", self.type_aliases),
            ("enums", self.enums),
            ("variables", self.variables),
            ("imports", self.imports),
            ("exports", self.exports),
            ("symbol references", self.symbol_references),
        ]
    }
}

impl AnalysisResult {
    pub fn stats(&self) -> AnalysisStats {
        AnalysisStats {
            files: self.modules.len(),
            failed_files: self.failed_files.len(),
            package_imports: self.package_imports.len(),
            classes: self.classes.len(),
            interfaces: self.interfaces.len(),
            methods: self.methods.len(),
            properties: self.properties.len(),
            parameters: self.parameters.len(),
            functions: self.functions.len(),
            type_aliases: self.type_aliases.len(),
            enums: self.enums.len(),
            variables: self.variables.len(),
            imports: self.imports.len(),
            exports: self.exports.len(),
            symbol_references: self.symbol_references.len(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check if every discovered file was extracted.
    pub fn is_complete(&self) -> bool {
        self.failed_files.is_empty()
    }

    pub fn module_by_path(&self, relative_path: &str) -> Option<&Module> {
        self.modules
            .iter()
            .find(|m| m.source.relative_path == relative_path)
    }

    pub fn classes_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Class> + 'a {
        self.classes.iter().filter(move |c| c.name == name)
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        writeln!(f, "{}@{}", self.package.name, self.package.version)?;
        writeln!(f, "Files: {} ({} failed)", stats.files, stats.failed_files)?;
        for (label, count) in stats.entity_counts() {
            writeln!(f, "  {label}: {count}")?;
        }

        let report = &self.report;
        for (label, counts) in [
            ("class extends", report.class_extends),
            ("class implements", report.class_implements),
            ("interface extends", report.interface_extends),
        ] {
            writeln!(
                f,
                "  {label}: {} resolved, {} ambiguous, {} unresolved",
                counts.resolved, counts.ambiguous, counts.unresolved
            )?;
        }
        write!(
            f,
            "  symbol usages: {} resolved, {} dropped",
            report.symbol_usages.resolved, report.symbol_usages.dropped
        )
    }
}
