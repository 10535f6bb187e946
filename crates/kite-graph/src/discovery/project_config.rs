//! `tsconfig.json` handling for discovery.
//!
//! Only the file-selection fields are read: `include`, `exclude` and
//! `files`. The file is JSONC, so comments and trailing commas are stripped
//! before it reaches `serde_json`.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the project configuration file looked up at the package root.
pub const PROJECT_CONFIG_FILE: &str = "tsconfig.json";

/// Errors reading the project configuration. Discovery logs these and falls
/// back to a full traversal.
#[derive(Debug, thiserror::Error)]
pub enum ProjectConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid project config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

/// Traversal starting points derived from `include`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeRoots {
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

impl ProjectConfig {
    pub fn load(path: &Path) -> Result<Self, ProjectConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProjectConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ProjectConfigError> {
        let json = strip_trailing_commas(&strip_json_comments(content));
        Ok(serde_json::from_str(&json)?)
    }

    /// Cut every include pattern at its first wildcard segment.
    ///
    /// `src/**/*.ts` → directory `src`, `lib` → directory `lib`,
    /// `index.ts` → file `index.ts`. Paths are relative to `config_dir`.
    pub fn include_roots(&self, config_dir: &Path) -> IncludeRoots {
        let mut roots = IncludeRoots::default();
        let Some(include) = &self.include else {
            roots.directories.push(config_dir.to_path_buf());
            return roots;
        };

        for pattern in include {
            let pattern = normalize_pattern(pattern);
            let mut literal = Vec::new();
            let mut has_wildcard = false;
            for segment in pattern.split('/') {
                if is_glob_segment(segment) {
                    has_wildcard = true;
                    break;
                }
                literal.push(segment);
            }

            let path = config_dir.join(literal.join("/"));
            if has_wildcard || path.is_dir() {
                roots.directories.push(path);
            } else {
                roots.files.push(path);
            }
        }
        roots
    }

    /// Compile the configuration's own file selection.
    pub fn file_matcher(&self, config_dir: &Path) -> Result<FileMatcher, ProjectConfigError> {
        let include = match (&self.include, &self.files) {
            (Some(include), _) => include.clone(),
            (None, None) => vec!["**/*".to_string()],
            (None, Some(_)) => Vec::new(),
        };
        let exclude = self.exclude.clone().unwrap_or_default();

        Ok(FileMatcher {
            include: build_glob_set(&include, config_dir)?,
            exclude: build_glob_set(&exclude, config_dir)?,
            files: self
                .files
                .iter()
                .flatten()
                .map(|f| config_dir.join(normalize_pattern(f)))
                .collect(),
        })
    }
}

/// The computed file list of a project configuration.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    include: GlobSet,
    exclude: GlobSet,
    /// Entries of `files`, always part of the list
    pub files: Vec<PathBuf>,
}

impl FileMatcher {
    /// `relative` uses forward slashes and is relative to the config directory.
    pub fn matches(&self, relative: &str) -> bool {
        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }
}

fn normalize_pattern(pattern: &str) -> &str {
    let pattern = pattern.trim();
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    pattern.trim_end_matches('/')
}

fn is_glob_segment(segment: &str) -> bool {
    segment.contains(['*', '?', '[', '{'])
}

fn build_glob_set(patterns: &[String], config_dir: &Path) -> Result<GlobSet, ProjectConfigError> {
    let mut builder = GlobSetBuilder::new();
    for raw in patterns {
        let pattern = normalize_pattern(raw);
        let mut expanded = vec![pattern.to_string()];
        // A bare directory name selects everything beneath it
        if !pattern.split('/').any(is_glob_segment) && config_dir.join(pattern).is_dir() {
            expanded = vec![format!("{pattern}/**/*")];
        } else if pattern.ends_with("**") {
            expanded.push(format!("{pattern}/*"));
        }

        for glob in expanded {
            let compiled = GlobBuilder::new(&glob)
                .literal_separator(true)
                .build()
                .map_err(|source| ProjectConfigError::InvalidPattern {
                    pattern: raw.clone(),
                    source,
                })?;
            builder.add(compiled);
        }
    }
    builder.build().map_err(|source| ProjectConfigError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Remove `//` and `/* */` comments outside of string literals.
pub fn strip_json_comments(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape_next = false;

    while let Some(c) = chars.next() {
        if escape_next {
            output.push(c);
            escape_next = false;
            continue;
        }

        if c == '\\' && in_string {
            output.push(c);
            escape_next = true;
            continue;
        }

        if c == '"' {
            in_string = !in_string;
            output.push(c);
            continue;
        }

        if !in_string && c == '/' {
            match chars.peek() {
                Some('/') => {
                    chars.next();
                    for c in chars.by_ref() {
                        if c == '\n' {
                            output.push(c);
                            break;
                        }
                    }
                    continue;
                }
                Some('*') => {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '*' && chars.peek() == Some(&'/') {
                            chars.next();
                            break;
                        }
                    }
                    continue;
                }
                _ => {}
            }
        }

        output.push(c);
    }

    output
}

/// Drop commas that directly precede `}` or `]` (ignoring whitespace).
pub fn strip_trailing_commas(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escape_next = false;
    let chars: Vec<char> = input.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if escape_next {
            escape_next = false;
        } else if in_string && c == '\\' {
            escape_next = true;
        } else if c == '"' {
            in_string = !in_string;
        } else if !in_string && c == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        output.push(c);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_jsonc() {
        let config = ProjectConfig::parse(
            r#"{
                // compiler settings are ignored
                "compilerOptions": { "strict": true, },
                /* the interesting part */
                "include": ["src/**/*", "types/*.ts",],
                "exclude": ["src/**/*.spec.ts"]
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.include.as_deref(),
            Some(&["src/**/*".to_string(), "types/*.ts".to_string()][..])
        );
        assert!(config.files.is_none());
    }

    #[test]
    fn test_comment_markers_inside_strings_survive() {
        let stripped = strip_json_comments(r#"{ "url": "http://x/*y*/" } // tail"#);
        assert_eq!(stripped.trim_end(), r#"{ "url": "http://x/*y*/" }"#);
        assert_eq!(strip_trailing_commas(r#"{"a": ",]"}"#), r#"{"a": ",]"}"#);
    }

    #[test]
    fn test_include_roots() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("lib")).unwrap();

        let config = ProjectConfig {
            include: Some(vec![
                "./src/**/*.ts".to_string(),
                "lib".to_string(),
                "main.ts".to_string(),
            ]),
            ..Default::default()
        };

        let roots = config.include_roots(temp.path());
        assert_eq!(
            roots.directories,
            vec![temp.path().join("src"), temp.path().join("lib")]
        );
        assert_eq!(roots.files, vec![temp.path().join("main.ts")]);
    }

    #[test]
    fn test_file_matcher() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig {
            include: Some(vec!["src/**/*".to_string()]),
            exclude: Some(vec!["src/**/*.spec.ts".to_string()]),
            files: Some(vec!["setup.ts".to_string()]),
        };

        let matcher = config.file_matcher(temp.path()).unwrap();
        assert!(matcher.matches("src/a.ts"));
        assert!(matcher.matches("src/deep/b.ts"));
        assert!(!matcher.matches("src/a.spec.ts"));
        assert!(!matcher.matches("other/c.ts"));
        assert_eq!(matcher.files, vec![temp.path().join("setup.ts")]);
    }

    #[test]
    fn test_invalid_glob_is_reported() {
        let config = ProjectConfig {
            include: Some(vec!["src/[".to_string()]),
            ..Default::default()
        };
        let err = config.file_matcher(Path::new("/nonexistent")).unwrap_err();
        assert!(matches!(err, ProjectConfigError::InvalidPattern { .. }));
    }
}
