//! Types shared by component-file script extractors.

/// One `<script>` block of a component file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedScript<'a> {
    /// Script body, empty for self-closing or externally sourced blocks
    pub source_text: &'a str,

    /// Byte offset of the body from the start of the original file
    pub source_offset: usize,

    pub context: ScriptContext,

    /// Language identifier as written in `lang` (js when absent)
    pub lang: &'a str,

    /// The block has a `src` attribute; its code lives in another file
    pub is_external: bool,
}

/// Which kind of script block a body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptContext {
    /// `<script setup>`
    VueSetup,
    /// Plain `<script>`
    VueRegular,
}

/// Script language of an isolated body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLang {
    Js,
    Jsx,
    Ts,
    Tsx,
}

impl ScriptLang {
    /// Accepted `lang` values. Anything else (coffee, etc.) is skipped.
    pub fn from_attribute(lang: &str) -> Option<Self> {
        match lang.trim().to_ascii_lowercase().as_str() {
            "js" | "javascript" => Some(Self::Js),
            "jsx" => Some(Self::Jsx),
            "ts" | "typescript" => Some(Self::Ts),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    pub fn is_typescript(&self) -> bool {
        matches!(self, Self::Ts | Self::Tsx)
    }

    pub fn is_jsx(&self) -> bool {
        matches!(self, Self::Jsx | Self::Tsx)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Too many script tags: {count} found (max: {max} allowed)")]
    TooManyScriptTags { count: usize, max: usize },

    #[error("Unclosed script tag starting at byte position {position}")]
    UnclosedScriptTag { position: usize },
}

/// Script extraction for one component format.
pub trait Extractor {
    fn extract<'a>(&self, source: &'a str) -> Result<Vec<ExtractedScript<'a>>, ExtractorError>;

    /// File extension handled, without the dot.
    fn file_extension(&self) -> &'static str;
}

/// Maximum file size in bytes (10 MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Maximum number of script tags to process
pub const MAX_SCRIPT_TAGS: usize = 100;
