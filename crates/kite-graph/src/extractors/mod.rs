//! Script isolation for component files.
//!
//! A `.vue` file is reduced to the code of its usable `<script>` blocks
//! before parsing. Plain script files pass through untouched.

mod common;
mod vue;

pub use common::{
    ExtractedScript, Extractor, ExtractorError, MAX_FILE_SIZE, MAX_SCRIPT_TAGS, ScriptContext,
    ScriptLang,
};
pub use vue::VueExtractor;

use std::path::Path;

/// Script code isolated from a component file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolatedScript {
    /// `<script setup>` first, then the regular block, joined by a blank line
    pub text: String,
    /// Language the combined text is parsed as
    pub lang: ScriptLang,
}

/// Whether files with this path need script isolation.
pub fn is_component_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == VueExtractor.file_extension())
}

/// Isolate the parseable script code of a component file.
///
/// Externally sourced blocks and blocks in unsupported languages are
/// skipped. A file with no usable block yields empty text.
pub fn isolate_scripts(content: &str) -> Result<IsolatedScript, ExtractorError> {
    let scripts = VueExtractor.extract(content)?;

    let mut setup = Vec::new();
    let mut regular = Vec::new();
    let mut lang = ScriptLang::Js;

    for script in &scripts {
        if script.is_external {
            continue;
        }
        let Some(script_lang) = ScriptLang::from_attribute(script.lang) else {
            continue;
        };
        lang = merge_lang(lang, script_lang);
        match script.context {
            ScriptContext::VueSetup => setup.push(script.source_text),
            ScriptContext::VueRegular => regular.push(script.source_text),
        }
    }

    let text = setup
        .into_iter()
        .chain(regular)
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(IsolatedScript { text, lang })
}

fn merge_lang(a: ScriptLang, b: ScriptLang) -> ScriptLang {
    match (a.is_typescript() || b.is_typescript(), a.is_jsx() || b.is_jsx()) {
        (true, true) => ScriptLang::Tsx,
        (true, false) => ScriptLang::Ts,
        (false, true) => ScriptLang::Jsx,
        (false, false) => ScriptLang::Js,
    }
}
