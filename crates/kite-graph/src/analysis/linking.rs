//! Import targets: relative sources to in-package modules, bare sources to
//! declared dependencies.

use std::path::PathBuf;

use path_clean::PathClean;
use rustc_hash::FxHashMap;

use crate::id::EntityId;
use crate::model::Import;
use crate::package_json::DependencyMetadata;

/// Emitted extensions that a TypeScript source may stand in for.
const SOURCE_SUBSTITUTES: &[(&str, &[&str])] = &[
    ("js", &["ts", "tsx"]),
    ("jsx", &["tsx"]),
    ("mjs", &["mts"]),
    ("cjs", &["cts"]),
];

/// Locates modules by package-relative path.
#[derive(Debug, Default)]
pub struct ModuleLocator {
    by_path: FxHashMap<String, EntityId>,
    paths: FxHashMap<EntityId, String>,
    extensions: Vec<String>,
}

impl ModuleLocator {
    pub fn new<I>(modules: I, extensions: &[String]) -> Self
    where
        I: IntoIterator<Item = (String, EntityId)>,
    {
        let mut locator = Self {
            extensions: extensions.to_vec(),
            ..Default::default()
        };
        for (path, id) in modules {
            locator.paths.insert(id, path.clone());
            locator.by_path.insert(path, id);
        }
        locator
    }

    pub fn path_of(&self, module_id: &EntityId) -> Option<&str> {
        self.paths.get(module_id).map(String::as_str)
    }

    /// Module a relative `specifier` written in `from` points at.
    ///
    /// Tries the path as written, TypeScript sources behind emitted
    /// extensions, every supported extension, then `index.*` files.
    pub fn locate(&self, from: &str, specifier: &str) -> Option<EntityId> {
        let directory = from.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
        let joined = if directory.is_empty() {
            PathBuf::from(specifier)
        } else {
            PathBuf::from(directory).join(specifier)
        };
        let base = joined.clean().to_string_lossy().replace('\\', "/");
        if base.starts_with("..") || base.starts_with('/') {
            return None;
        }

        if let Some(id) = self.by_path.get(&base) {
            return Some(*id);
        }

        if let Some((stem, ext)) = base.rsplit_once('.')
            && let Some((_, substitutes)) = SOURCE_SUBSTITUTES.iter().find(|(e, _)| *e == ext)
        {
            for substitute in *substitutes {
                if let Some(id) = self.by_path.get(&format!("{stem}.{substitute}")) {
                    return Some(*id);
                }
            }
        }

        self.extensions
            .iter()
            .find_map(|ext| self.by_path.get(&format!("{base}.{ext}")))
            .or_else(|| {
                self.extensions
                    .iter()
                    .find_map(|ext| self.by_path.get(&format!("{base}/index.{ext}")))
            })
            .copied()
    }
}

/// Fill `target_module_id` and `target_package_id` of every import.
pub fn link_imports(imports: &mut [Import], locator: &ModuleLocator, deps: &DependencyMetadata) {
    for import in imports {
        if import.is_relative {
            import.target_module_id = locator
                .path_of(&import.module_id)
                .and_then(|from| locator.locate(from, &import.source));
        } else if let Some(name) = import.package_name.as_deref() {
            import.target_package_id = deps.package_id_of(name);
        }
    }
}
