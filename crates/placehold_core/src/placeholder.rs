//! Placeholder grammar: detection, extraction and syntax parsing.
//!
//! A placeholder is a `{? expression : default | metadata}` marker. The
//! expression token must start immediately after the `?` (ignoring
//! whitespace) with something other than whitespace, `:` or `|`, so
//! delimiter-only noise like `{? }` or `{?:x}` is never recognized.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::{PlaceholderError, PlaceholderResult};
use crate::literal::parse_literal;

const DEFAULT_SEPARATOR: char = ':';
const METADATA_SEPARATOR: char = '|';
const MARKER: char = '?';

/// The compiled placeholder pattern, shared by detection and extraction
/// so the two can never drift apart.
pub(crate) fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\s*\?\s*[^\s:|][^}]*\}").unwrap())
}

/// One parsed placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholder {
    /// Path, self-reference or `$VAR` reference; `None` when the
    /// placeholder carried no expression token.
    pub expression: Option<String>,
    /// Fallback applied when the expression resolves to nothing.
    pub default_value: Option<Value>,
    /// Structured side-data passed through to the replacer.
    pub metadata: Option<Value>,
}

impl Placeholder {
    /// Parse one raw matched placeholder, braces and marker included.
    pub fn parse(raw: &str) -> PlaceholderResult<Self> {
        let (expression, default_text, metadata_text) = split(raw);

        let metadata = match metadata_text {
            Some(fragment) => Some(parse_literal(fragment).map_err(|source| {
                PlaceholderError::Metadata {
                    placeholder: raw.to_string(),
                    source,
                }
            })?),
            None => None,
        };

        Ok(Self {
            expression: expression.map(str::to_string),
            default_value: default_text.map(coerce_default),
            metadata,
        })
    }
}

/// Split a raw placeholder into (expression, default, metadata) fragments.
///
/// Each separator is located by a left-to-right scan for its FIRST
/// occurrence: metadata may legitimately contain further `:` and `|`
/// characters, so the `|` split happens before the `:` search and the
/// `:` search only covers the text before the metadata. Zero-length
/// trimmed fragments come back as `None`: a separator with nothing
/// after it means "not given", not "empty".
fn split(raw: &str) -> (Option<&str>, Option<&str>, Option<&str>) {
    let after_marker = match raw.find(MARKER) {
        Some(pos) => &raw[pos + MARKER.len_utf8()..],
        None => raw,
    };
    let mut text = after_marker.strip_suffix('}').unwrap_or(after_marker);

    let metadata = match text.find(METADATA_SEPARATOR) {
        Some(pos) => {
            let fragment = non_empty(&text[pos + 1..]);
            text = &text[..pos];
            fragment
        }
        None => None,
    };

    let default_value = match text.find(DEFAULT_SEPARATOR) {
        Some(pos) => {
            let fragment = non_empty(&text[pos + 1..]);
            text = &text[..pos];
            fragment
        }
        None => None,
    };

    (non_empty(text), default_value, metadata)
}

fn non_empty(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Type a raw default fragment: finite numbers become numbers, `true`
/// and `false` become booleans, anything else stays text.
fn coerce_default(text: &str) -> Value {
    if let Ok(n) = text.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = text.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(text.to_string()),
    }
}
