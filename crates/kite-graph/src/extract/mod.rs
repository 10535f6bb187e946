//! Per-file declaration extraction.
//!
//! Turns one source file into declaration records, name-based deferred
//! relationship references and raw symbol usages. Nothing here looks beyond
//! the file: resolving names to ids is left to the whole-package passes in
//! [`crate::resolve`].
//!
//! Extraction never fails from the caller's point of view. Any problem
//! (unreadable file, oversized file, bad script block, syntax error) is
//! logged and the file is reported as a bare module record with
//! `failed = true`.

mod classes;
mod module_items;
mod text;
mod usage;

use classes::ParentMember;

pub use text::{normalize_type_text, ASYNC_RETURN_TYPE, CONSTRUCTOR_RETURN_TYPE, DEFAULT_TYPE};
pub use usage::{RawUsage, collect_usages};

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::discovery::relative_path;
use crate::extractors::{ExtractorError, ScriptLang, is_component_file, isolate_scripts};
use crate::id::{EntityId, EntityKind, generate_id, keys};
use crate::model::{
    Class, ClassExtendsRef, ClassImplementsRef, Enum, Export, Function, Import, Interface,
    InterfaceExtendsRef, Method, Module, ModuleSource, Parameter, Property, SymbolUsageRef,
    TypeAlias, Variable,
};
use crate::runtime::{Runtime, RuntimeError};

/// Share of re-exported names above which a module counts as a barrel.
const BARREL_REEXPORT_RATIO: f64 = 0.8;

/// Why a file degraded to a bare module record.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to read file: {0}")]
    Read(#[from] RuntimeError),

    #[error("file too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("file is not valid UTF-8")]
    InvalidUtf8,

    #[error(transparent)]
    Script(#[from] ExtractorError),

    #[error("parse failed: {0}")]
    Parse(String),
}

/// Identity and location of the file being extracted.
#[derive(Debug, Clone)]
pub struct FileContext {
    pub package_id: EntityId,
    pub module_id: EntityId,
    /// Absolute path
    pub path: PathBuf,
    /// Path relative to the package root, with `/` separators
    pub relative_path: String,
}

impl FileContext {
    /// `None` when `path` is not inside `root`.
    pub fn new(package_id: EntityId, root: &Path, path: &Path) -> Option<Self> {
        let relative_path = relative_path(path, root)?;
        let module_id = generate_id(
            EntityKind::Module,
            &keys::module(&package_id, &relative_path),
        );
        Some(Self {
            package_id,
            module_id,
            path: path.to_path_buf(),
            relative_path,
        })
    }

    /// Module record of this file.
    pub fn module_record(&self, is_barrel: bool) -> Module {
        let (directory, filename) = match self.relative_path.rsplit_once('/') {
            Some((dir, file)) => (dir.to_string(), file.to_string()),
            None => (String::new(), self.relative_path.clone()),
        };
        let stem = filename
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&filename);
        let index_file = (stem == "index").then(|| filename.clone());
        let name = match self.relative_path.rsplit_once('.') {
            Some((without_ext, _)) if !without_ext.is_empty() => without_ext.to_string(),
            _ => self.relative_path.clone(),
        };

        Module {
            id: self.module_id,
            package_id: self.package_id,
            name,
            source: ModuleSource {
                directory,
                filename,
                relative_path: self.relative_path.clone(),
                index_file,
                is_barrel,
            },
        }
    }

    fn source_type(&self, lang: Option<ScriptLang>) -> SourceType {
        match lang {
            Some(ScriptLang::Ts) => SourceType::ts(),
            Some(ScriptLang::Tsx) => SourceType::tsx(),
            Some(ScriptLang::Jsx) => SourceType::jsx(),
            Some(ScriptLang::Js) => SourceType::mjs(),
            None => SourceType::from_path(&self.path).unwrap_or_else(|_| SourceType::mjs()),
        }
    }
}

/// Everything extracted from one file.
#[derive(Debug, Clone)]
pub struct FileExtraction {
    pub module: Module,
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
    pub symbol_usages: Vec<SymbolUsageRef>,
    /// The file degraded to a bare module record
    pub failed: bool,
}

impl FileExtraction {
    fn empty(ctx: &FileContext) -> Self {
        Self {
            module: ctx.module_record(false),
            classes: Vec::new(),
            interfaces: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            parameters: Vec::new(),
            functions: Vec::new(),
            type_aliases: Vec::new(),
            enums: Vec::new(),
            variables: Vec::new(),
            imports: Vec::new(),
            exports: Vec::new(),
            class_extends: Vec::new(),
            class_implements: Vec::new(),
            interface_extends: Vec::new(),
            symbol_usages: Vec::new(),
            failed: false,
        }
    }

    /// The minimal result of a file that could not be extracted.
    pub fn failed(ctx: &FileContext) -> Self {
        Self {
            failed: true,
            ..Self::empty(ctx)
        }
    }
}

/// Read and extract one file. Failures are logged and downgraded.
pub async fn extract_file(runtime: &dyn Runtime, ctx: &FileContext, max_file_size: u64) -> FileExtraction {
    match read_source(runtime, ctx, max_file_size).await {
        Ok(source) => extract_source_lossy(ctx, &source),
        Err(e) => {
            warn!("Skipping {}: {}", ctx.relative_path, e);
            FileExtraction::failed(ctx)
        }
    }
}

/// Extract from in-memory source, downgrading failures like [`extract_file`].
pub fn extract_source_lossy(ctx: &FileContext, source: &str) -> FileExtraction {
    extract_source(ctx, source).unwrap_or_else(|e| {
        warn!("Skipping {}: {}", ctx.relative_path, e);
        FileExtraction::failed(ctx)
    })
}

async fn read_source(
    runtime: &dyn Runtime,
    ctx: &FileContext,
    max_file_size: u64,
) -> Result<String, ExtractError> {
    let metadata = runtime.metadata(&ctx.path).await?;
    if metadata.size > max_file_size {
        return Err(ExtractError::TooLarge {
            size: metadata.size,
            max: max_file_size,
        });
    }
    let bytes = runtime.read_file(&ctx.path).await?;
    String::from_utf8(bytes).map_err(|_| ExtractError::InvalidUtf8)
}

/// Extract declarations from `source`, the content of `ctx.path`.
pub fn extract_source(ctx: &FileContext, source: &str) -> Result<FileExtraction, ExtractError> {
    let (code, lang) = if is_component_file(&ctx.path) {
        let isolated = isolate_scripts(source)?;
        (isolated.text, Some(isolated.lang))
    } else {
        (source.to_string(), None)
    };

    if code.trim().is_empty() {
        return Ok(FileExtraction::empty(ctx));
    }

    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, &code, ctx.source_type(lang)).parse();
    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser panicked".to_string());
        return Err(ExtractError::Parse(message));
    }

    let mut extractor = FileExtractor::new(ctx, &code);
    extractor.extract_program(&ret.program);
    Ok(extractor.finish())
}

/// Export bookkeeping for the barrel heuristic.
#[derive(Debug, Default)]
struct ExportTally {
    names: FxHashSet<String>,
    reexported: FxHashSet<String>,
    has_wildcard: bool,
}

impl ExportTally {
    fn is_barrel(&self) -> bool {
        if self.has_wildcard {
            return true;
        }
        !self.names.is_empty()
            && self.reexported.len() as f64 / self.names.len() as f64 > BARREL_REEXPORT_RATIO
    }
}

/// Working state of one file's extraction.
struct FileExtractor<'s> {
    ctx: &'s FileContext,
    source: &'s str,
    out: FileExtraction,
    /// Declarations already recorded, by kind and name
    seen: FxHashSet<(EntityKind, String)>,
    /// Local names exported through `export { x }` or `export default x`
    exported_locals: FxHashSet<String>,
    /// Functions recorded from a bodyless overload signature
    signature_only: FxHashSet<String>,
    /// Start offsets of interface declarations already extracted
    interface_declarations: FxHashSet<u32>,
    /// Member names per interface, shared by merged declarations
    interface_members: FxHashMap<EntityId, FxHashSet<(ParentMember, String)>>,
    tally: ExportTally,
}

impl<'s> FileExtractor<'s> {
    fn new(ctx: &'s FileContext, source: &'s str) -> Self {
        Self {
            ctx,
            source,
            out: FileExtraction::empty(ctx),
            seen: FxHashSet::default(),
            exported_locals: FxHashSet::default(),
            signature_only: FxHashSet::default(),
            interface_declarations: FxHashSet::default(),
            interface_members: FxHashMap::default(),
            tally: ExportTally::default(),
        }
    }

    /// Record `(kind, name)` as seen; false if it already was.
    fn first_sighting(&mut self, kind: EntityKind, name: &str) -> bool {
        self.seen.insert((kind, name.to_string()))
    }

    fn scoped_id(&self, kind: EntityKind, name: &str) -> EntityId {
        generate_id(
            kind,
            &keys::module_scoped(&self.ctx.package_id, &self.ctx.module_id, name),
        )
    }

    fn finish(mut self) -> FileExtraction {
        self.out.module.source.is_barrel = self.tally.is_barrel();
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn context(relative: &str) -> FileContext {
        let package_id = generate_id(EntityKind::Package, "fixture@1.0.0");
        FileContext::new(package_id, Path::new("/pkg"), &Path::new("/pkg").join(relative)).unwrap()
    }

    #[test]
    fn test_module_record_fields() {
        let module = context("src/models/index.ts").module_record(false);
        assert_eq!(module.name, "src/models/index");
        assert_eq!(module.source.directory, "src/models");
        assert_eq!(module.source.filename, "index.ts");
        assert_eq!(module.source.index_file.as_deref(), Some("index.ts"));

        let root_file = context("main.js").module_record(false);
        assert_eq!(root_file.source.directory, "");
        assert_eq!(root_file.source.index_file, None);
    }

    #[test]
    fn test_module_id_depends_only_on_package_and_path() {
        assert_eq!(context("src/a.ts").module_id, context("src/a.ts").module_id);
        assert_ne!(context("src/a.ts").module_id, context("src/b.ts").module_id);
    }

    #[test]
    fn test_syntax_error_degrades_to_bare_module() {
        let ctx = context("src/broken.ts");
        assert!(matches!(
            extract_source(&ctx, "export class {{{"),
            Err(ExtractError::Parse(_))
        ));

        let result = extract_source_lossy(&ctx, "export class {{{");
        assert!(result.failed);
        assert_eq!(result.module.id, ctx.module_id);
        assert!(result.classes.is_empty());
    }

    #[test]
    fn test_template_only_vue_is_an_empty_module() {
        let ctx = context("src/Logo.vue");
        let result = extract_source(&ctx, "<template><img src=\"logo.png\"></template>").unwrap();
        assert!(!result.failed);
        assert!(result.imports.is_empty());
        assert!(result.classes.is_empty());
    }

    #[test]
    fn test_unclosed_vue_script_fails_the_file() {
        let ctx = context("src/Broken.vue");
        let result = extract_source_lossy(&ctx, "<script setup lang=\"ts\">const a = 1");
        assert!(result.failed);
    }
}
