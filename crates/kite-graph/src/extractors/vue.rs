//! Vue single-file component script extractor.

use memchr::memmem;

use super::common::{
    ExtractedScript, Extractor, ExtractorError, MAX_FILE_SIZE, MAX_SCRIPT_TAGS, ScriptContext,
};

#[derive(Debug, Clone, Copy)]
pub struct VueExtractor;

impl Extractor for VueExtractor {
    fn extract<'a>(&self, source: &'a str) -> Result<Vec<ExtractedScript<'a>>, ExtractorError> {
        if source.len() > MAX_FILE_SIZE {
            return Err(ExtractorError::FileTooLarge {
                size: source.len(),
                max: MAX_FILE_SIZE,
            });
        }

        let mut scripts = Vec::new();
        let mut pointer = 0;

        while let Some(script) = parse_script(source, &mut pointer)? {
            scripts.push(script);
            if scripts.len() > MAX_SCRIPT_TAGS {
                return Err(ExtractorError::TooManyScriptTags {
                    count: scripts.len(),
                    max: MAX_SCRIPT_TAGS,
                });
            }
        }

        Ok(scripts)
    }

    fn file_extension(&self) -> &'static str {
        "vue"
    }
}

/// Parse the next script block at or after `pointer`.
fn parse_script<'a>(
    source: &'a str,
    pointer: &mut usize,
) -> Result<Option<ExtractedScript<'a>>, ExtractorError> {
    let bytes = source.as_bytes();

    loop {
        let Some(script_start) = find(bytes, *pointer, b"<script") else {
            return Ok(None);
        };
        *pointer = script_start + "<script".len();

        // `<scripts>` and friends are not script tags
        if *pointer < bytes.len()
            && !matches!(bytes[*pointer], b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/')
        {
            continue;
        }

        let Some(tag_end) = find_closing_angle(bytes, *pointer) else {
            return Err(ExtractorError::UnclosedScriptTag {
                position: script_start,
            });
        };

        let attributes = parse_attributes(&source[*pointer..tag_end]);
        let context = if attributes.iter().any(|(name, _)| *name == "setup") {
            ScriptContext::VueSetup
        } else {
            ScriptContext::VueRegular
        };
        let lang = attributes
            .iter()
            .find(|(name, _)| *name == "lang")
            .and_then(|(_, value)| *value)
            .unwrap_or("js");
        let is_external = attributes.iter().any(|(name, _)| *name == "src");

        if bytes[tag_end - 1] == b'/' {
            *pointer = tag_end + 1;
            return Ok(Some(ExtractedScript {
                source_text: "",
                source_offset: tag_end + 1,
                context,
                lang,
                is_external,
            }));
        }

        let content_start = tag_end + 1;
        let Some(script_end) = find(bytes, content_start, b"</script>") else {
            return Err(ExtractorError::UnclosedScriptTag {
                position: script_start,
            });
        };
        *pointer = script_end + "</script>".len();

        return Ok(Some(ExtractedScript {
            source_text: if is_external {
                ""
            } else {
                &source[content_start..script_end]
            },
            source_offset: content_start,
            context,
            lang,
            is_external,
        }));
    }
}

fn find(bytes: &[u8], start: usize, needle: &[u8]) -> Option<usize> {
    memmem::find(&bytes[start..], needle).map(|pos| start + pos)
}

/// Finds the closing `>` of a tag, skipping quoted attribute values.
fn find_closing_angle(bytes: &[u8], start: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;

    for (i, &byte) in bytes[start..].iter().enumerate() {
        match (byte, quote) {
            (b'"' | b'\'', None) => quote = Some(byte),
            (b, Some(q)) if b == q => quote = None,
            (b'>', None) => return Some(start + i),
            _ => {}
        }
    }

    None
}

/// Split tag content into `(name, value)` pairs. Boolean attributes have no
/// value.
fn parse_attributes(tag: &str) -> Vec<(&str, Option<&str>)> {
    let mut attributes = Vec::new();
    let mut rest = tag.trim_start_matches('/').trim();

    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        rest = rest[name_end..].trim_start();

        let mut value = None;
        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            match after_eq.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    let end = body.find(q).unwrap_or(body.len());
                    value = Some(&body[..end]);
                    rest = body.get(end + 1..).unwrap_or("");
                }
                _ => {
                    let end = after_eq
                        .find(|c: char| c.is_whitespace() || c == '/')
                        .unwrap_or(after_eq.len());
                    value = Some(&after_eq[..end]);
                    rest = &after_eq[end..];
                }
            }
        }

        if !name.is_empty() {
            attributes.push((name, value));
        }
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
    }

    attributes
}
