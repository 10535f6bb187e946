//! The package analysis pipeline.
//!
//! One `analyze` call reads dependency metadata, discovers files, extracts
//! them with bounded concurrency, aggregates the per-file results, links
//! imports, runs both resolver passes and deduplicates every collection.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, warn};

use super::config::AnalyzerConfig;
use super::linking::{ModuleLocator, link_imports};
use super::result::AnalysisResult;
use crate::concurrency::run_bounded;
use crate::discovery::{DiscoveredFiles, discover};
use crate::error::{AnalyzeError, Result};
use crate::extract::{FileContext, FileExtraction, extract_file};
use crate::id::{EntityId, EntityKind, generate_id, keys};
use crate::model::{
    Class, ClassExtendsRef, ClassImplementsRef, Enum, Export, Function, Import, Interface,
    InterfaceExtendsRef, Method, Module, Package, Parameter, Property, SymbolUsageRef, TypeAlias,
    Variable, dedup_by_id,
};
use crate::package_json::{PackageJson, PackageLock, read_dependencies};
use crate::resolve::{NameIndex, RelationshipRefs, resolve_relationships, resolve_symbol_usages};
use crate::runtime::{NativeRuntime, Runtime, RuntimeError};

const MANIFEST_FILE: &str = "package.json";
const LOCKFILE: &str = "package-lock.json";

/// Builder for one package analysis.
///
/// # Example
///
/// ```rust,no_run
/// use kite_graph::{Analyzer, AnalyzerConfig};
///
/// # async fn example() -> kite_graph::Result<()> {
/// let result = Analyzer::new("./my-package")
///     .config(AnalyzerConfig::default())
///     .analyze()
///     .await?;
///
/// println!("{} classes", result.classes.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Analyzer {
    root: PathBuf,
    config: AnalyzerConfig,
    runtime: Option<Arc<dyn Runtime>>,
    files: Option<Vec<PathBuf>>,
}

impl Analyzer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: AnalyzerConfig::default(),
            runtime: None,
            files: None,
        }
    }

    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of files extracted at once.
    pub fn concurrency(mut self, width: usize) -> Self {
        self.config.concurrency = width;
        self
    }

    /// Set the runtime used to read manifests and sources.
    ///
    /// Defaults to [`NativeRuntime`].
    pub fn runtime(mut self, runtime: Arc<dyn Runtime>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Emit only the records of these files (append mode).
    ///
    /// Relative paths are taken relative to the package root. Files that
    /// discovery does not report are ignored. Every discovered file is still
    /// extracted so references resolve against the whole package; ids and
    /// resolution outcomes match a full run.
    pub fn files(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.files = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    pub async fn analyze(self) -> Result<AnalysisResult> {
        let runtime = self
            .runtime
            .clone()
            .unwrap_or_else(|| Arc::new(NativeRuntime::new()));
        let root = self.package_root(runtime.as_ref()).await?;

        // Prerequisites: failures here abort the whole package
        let manifest = PackageJson::from_path(runtime.as_ref(), &root.join(MANIFEST_FILE)).await?;
        let lockfile = PackageLock::load(runtime.as_ref(), &root.join(LOCKFILE)).await;
        let deps = read_dependencies(&manifest, lockfile.as_ref());

        let name = manifest.package_name();
        let version = manifest.package_version();
        let package = Package {
            id: generate_id(EntityKind::Package, &keys::package(&name, &version)),
            name,
            version,
            path: root.clone(),
            dependencies: deps.dependencies.clone(),
            dev_dependencies: deps.dev_dependencies.clone(),
            peer_dependencies: deps.peer_dependencies.clone(),
        };
        debug!("Analyzing {}@{} at {}", package.name, package.version, root.display());

        let discovered = {
            let walk_root = root.clone();
            let config = self.config.clone();
            tokio::task::spawn_blocking(move || discover(&walk_root, &config))
                .await
                .map_err(|e| AnalyzeError::Discovery {
                    root: root.clone(),
                    message: e.to_string(),
                })??
        };
        debug!(
            "Discovered {} files ({:?})",
            discovered.files.len(),
            discovered.strategy
        );

        // Every discovered file has a module id, extracted or not
        let all_contexts: Vec<FileContext> = discovered
            .files
            .iter()
            .filter_map(|path| FileContext::new(package.id, &root, path))
            .collect();
        let locator = ModuleLocator::new(
            all_contexts
                .iter()
                .map(|ctx| (ctx.relative_path.clone(), ctx.module_id)),
            &self.config.extensions,
        );

        // Names resolve against the whole package, so every file is
        // extracted even when only a subset is emitted.
        let selected = self.select(&root, &discovered, &all_contexts);
        let extractions = extract_all(runtime, all_contexts, &self.config).await;

        let mut graph = Aggregate::default();
        for extraction in extractions {
            graph.absorb(extraction);
        }
        graph.dedup();

        let index = NameIndex::build(
            &graph.classes,
            &graph.interfaces,
            &graph.methods,
            &graph.properties,
        );
        if let Some(selected) = &selected {
            graph.retain_modules(selected);
        }

        link_imports(&mut graph.imports, &locator, &deps);
        let mut report = resolve_relationships(
            &index,
            RelationshipRefs {
                class_extends: &mut graph.class_extends,
                class_implements: &mut graph.class_implements,
                interface_extends: &mut graph.interface_extends,
            },
        );
        apply_extends(&mut graph.classes, &graph.class_extends);

        let (symbol_references, usage_counts) = resolve_symbol_usages(&index, &graph.symbol_usages);
        report.symbol_usages = usage_counts;

        let result = AnalysisResult {
            package,
            package_imports: dedup_by_id(deps.package_imports),
            modules: graph.modules,
            classes: graph.classes,
            interfaces: graph.interfaces,
            methods: graph.methods,
            properties: graph.properties,
            parameters: graph.parameters,
            functions: graph.functions,
            type_aliases: graph.type_aliases,
            enums: graph.enums,
            variables: graph.variables,
            imports: graph.imports,
            exports: graph.exports,
            class_extends: graph.class_extends,
            class_implements: graph.class_implements,
            interface_extends: graph.interface_extends,
            symbol_references: dedup_by_id(symbol_references),
            report,
            strategy: discovered.strategy,
            failed_files: graph.failed_files,
        };

        let stats = result.stats();
        info!(
            "Analyzed {} files ({} failed): {} classes, {} interfaces, {} functions, {} symbol references",
            stats.files,
            stats.failed_files,
            stats.classes,
            stats.interfaces,
            stats.functions,
            stats.symbol_references
        );
        Ok(result)
    }

    async fn package_root(&self, runtime: &dyn Runtime) -> Result<PathBuf> {
        let root = std::path::absolute(&self.root)
            .map_err(|_| AnalyzeError::PackageRootNotFound(self.root.clone()))?
            .clean();

        match runtime.metadata(&root).await {
            Ok(metadata) if metadata.is_dir => Ok(root),
            Ok(_) => Err(AnalyzeError::NotADirectory(root)),
            Err(RuntimeError::FileNotFound(_)) => Err(AnalyzeError::PackageRootNotFound(root)),
            Err(e) => Err(AnalyzeError::Runtime(e)),
        }
    }

    /// Module ids of the explicit subset, if one was requested.
    fn select(
        &self,
        root: &Path,
        discovered: &DiscoveredFiles,
        contexts: &[FileContext],
    ) -> Option<FxHashSet<EntityId>> {
        let files = self.files.as_ref()?;

        let wanted: FxHashSet<PathBuf> = files
            .iter()
            .map(|p| if p.is_absolute() { p.clean() } else { root.join(p).clean() })
            .collect();
        let selected: FxHashSet<EntityId> = contexts
            .iter()
            .filter(|ctx| wanted.contains(&ctx.path))
            .map(|ctx| ctx.module_id)
            .collect();

        if selected.len() < wanted.len() {
            warn!(
                "{} of {} requested files are not among the {} discovered files",
                wanted.len() - selected.len(),
                wanted.len(),
                discovered.files.len()
            );
        }
        Some(selected)
    }
}

/// Analyze the package at `root` with default configuration.
pub async fn analyze(root: impl Into<PathBuf>) -> Result<AnalysisResult> {
    Analyzer::new(root).analyze().await
}

pub async fn analyze_with_config(
    root: impl Into<PathBuf>,
    config: AnalyzerConfig,
) -> Result<AnalysisResult> {
    Analyzer::new(root).config(config).analyze().await
}

async fn extract_all(
    runtime: Arc<dyn Runtime>,
    contexts: Vec<FileContext>,
    config: &AnalyzerConfig,
) -> Vec<FileExtraction> {
    let max_file_size = config.max_file_size;
    let results = run_bounded(
        contexts.clone(),
        config.effective_concurrency(),
        move |ctx: FileContext| {
            let runtime = Arc::clone(&runtime);
            async move { extract_file(runtime.as_ref(), &ctx, max_file_size).await }
        },
    )
    .await;

    contexts
        .iter()
        .zip(results)
        .map(|(ctx, slot)| slot.unwrap_or_else(|| FileExtraction::failed(ctx)))
        .collect()
}

/// Copy resolved class parents onto the class records.
fn apply_extends(classes: &mut [Class], refs: &[ClassExtendsRef]) {
    let parents: FxHashMap<EntityId, EntityId> = refs
        .iter()
        .filter_map(|r| r.parent_id.map(|parent| (r.class_id, parent)))
        .collect();
    for class in classes {
        class.extends_id = parents.get(&class.id).copied();
    }
}

/// Whole-package collections, in file order.
#[derive(Debug, Default)]
struct Aggregate {
    modules: Vec<Module>,
    classes: Vec<Class>,
    interfaces: Vec<Interface>,
    methods: Vec<Method>,
    properties: Vec<Property>,
    parameters: Vec<Parameter>,
    functions: Vec<Function>,
    type_aliases: Vec<TypeAlias>,
    enums: Vec<Enum>,
    variables: Vec<Variable>,
    imports: Vec<Import>,
    exports: Vec<Export>,
    class_extends: Vec<ClassExtendsRef>,
    class_implements: Vec<ClassImplementsRef>,
    interface_extends: Vec<InterfaceExtendsRef>,
    symbol_usages: Vec<SymbolUsageRef>,
    failed_files: Vec<String>,
}

impl Aggregate {
    fn absorb(&mut self, file: FileExtraction) {
        if file.failed {
            self.failed_files.push(file.module.source.relative_path.clone());
        }
        self.modules.push(file.module);
        self.classes.extend(file.classes);
        self.interfaces.extend(file.interfaces);
        self.methods.extend(file.methods);
        self.properties.extend(file.properties);
        self.parameters.extend(file.parameters);
        self.functions.extend(file.functions);
        self.type_aliases.extend(file.type_aliases);
        self.enums.extend(file.enums);
        self.variables.extend(file.variables);
        self.imports.extend(file.imports);
        self.exports.extend(file.exports);
        self.class_extends.extend(file.class_extends);
        self.class_implements.extend(file.class_implements);
        self.interface_extends.extend(file.interface_extends);
        self.symbol_usages.extend(file.symbol_usages);
    }

    /// Drop every record that does not belong to one of `modules`.
    fn retain_modules(&mut self, modules: &FxHashSet<EntityId>) {
        let keep = |id: &EntityId| modules.contains(id);
        self.modules.retain(|m| keep(&m.id));
        self.classes.retain(|r| keep(&r.module_id));
        self.interfaces.retain(|r| keep(&r.module_id));
        self.methods.retain(|r| keep(&r.module_id));
        self.properties.retain(|r| keep(&r.module_id));
        self.parameters.retain(|r| keep(&r.module_id));
        self.functions.retain(|r| keep(&r.module_id));
        self.type_aliases.retain(|r| keep(&r.module_id));
        self.enums.retain(|r| keep(&r.module_id));
        self.variables.retain(|r| keep(&r.module_id));
        self.imports.retain(|r| keep(&r.module_id));
        self.exports.retain(|r| keep(&r.module_id));
        self.class_extends.retain(|r| keep(&r.module_id));
        self.class_implements.retain(|r| keep(&r.module_id));
        self.interface_extends.retain(|r| keep(&r.module_id));
        self.symbol_usages.retain(|r| keep(&r.module_id));

        let kept_paths: FxHashSet<&str> = self
            .modules
            .iter()
            .map(|m| m.source.relative_path.as_str())
            .collect();
        self.failed_files.retain(|path| kept_paths.contains(path.as_str()));
    }

    fn dedup(&mut self) {
        self.modules = dedup_by_id(std::mem::take(&mut self.modules));
        self.classes = dedup_by_id(std::mem::take(&mut self.classes));
        self.interfaces = dedup_by_id(std::mem::take(&mut self.interfaces));
        self.methods = dedup_by_id(std::mem::take(&mut self.methods));
        self.properties = dedup_by_id(std::mem::take(&mut self.properties));
        self.parameters = dedup_by_id(std::mem::take(&mut self.parameters));
        self.functions = dedup_by_id(std::mem::take(&mut self.functions));
        self.type_aliases = dedup_by_id(std::mem::take(&mut self.type_aliases));
        self.enums = dedup_by_id(std::mem::take(&mut self.enums));
        self.variables = dedup_by_id(std::mem::take(&mut self.variables));
        self.imports = dedup_by_id(std::mem::take(&mut self.imports));
        self.exports = dedup_by_id(std::mem::take(&mut self.exports));
        self.class_extends = dedup_by_id(std::mem::take(&mut self.class_extends));
        self.class_implements = dedup_by_id(std::mem::take(&mut self.class_implements));
        self.interface_extends = dedup_by_id(std::mem::take(&mut self.interface_extends));
        self.symbol_usages = dedup_by_id(std::mem::take(&mut self.symbol_usages));
    }
}
