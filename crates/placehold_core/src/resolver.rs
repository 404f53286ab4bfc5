//! Placeholder resolution against a model value.
//!
//! The resolver handles:
//! - Expression evaluation (paths, self-references, environment variables)
//! - Single-pass substitution inside strings
//! - Structural resolution across nested containers

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::PlaceholderResult;
use crate::path::lookup;
use crate::placeholder::{pattern, Placeholder};

/// Replacement function: receives the resolved value (or its default),
/// the expression and the parsed metadata, and returns the text spliced
/// into the output. `None` is the absent value.
pub type Replacer = dyn Fn(Option<&Value>, Option<&str>, Option<&Value>) -> String + Send + Sync;

/// Environment capability used for `$VAR` expressions. Injected so the
/// evaluator never reaches into ambient process state directly.
pub type EnvReader = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Options for resolving placeholders.
#[derive(Clone)]
pub struct ResolveOptions {
    trusted: bool,
    replacer: Option<Arc<Replacer>>,
    env_reader: Arc<EnvReader>,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `$VAR` expressions to read environment variables. Off by
    /// default: untrusted templates must not observe the environment.
    pub fn trusted(mut self, trusted: bool) -> Self {
        self.trusted = trusted;
        self
    }

    /// Install a custom replacement function.
    pub fn with_replacer(
        mut self,
        replacer: impl Fn(Option<&Value>, Option<&str>, Option<&Value>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.replacer = Some(Arc::new(replacer));
        self
    }

    /// Substitute the environment reader used by `$VAR` expressions.
    pub fn with_env_reader(
        mut self,
        env_reader: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.env_reader = Arc::new(env_reader);
        self
    }

    pub fn is_trusted(&self) -> bool {
        self.trusted
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            trusted: false,
            replacer: None,
            env_reader: Arc::new(|name| std::env::var(name).ok()),
        }
    }
}

impl fmt::Debug for ResolveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveOptions")
            .field("trusted", &self.trusted)
            .field("replacer", &self.replacer.is_some())
            .finish()
    }
}

/// Resolve all placeholders in `template` against `model`.
///
/// Strings are substituted in place; arrays and objects come back as
/// fresh containers with every string leaf resolved and every other
/// leaf carried over; any other value passes through unchanged. The
/// input is never mutated.
pub fn resolve(template: &Value, model: &Value, options: &ResolveOptions) -> PlaceholderResult<Value> {
    match template {
        Value::String(text) => Ok(Value::String(resolve_str(text, model, options)?)),
        Value::Array(items) => items
            .iter()
            .map(|item| resolve(item, model, options))
            .collect::<PlaceholderResult<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                out.insert(key.clone(), resolve(value, model, options)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

/// Resolve all placeholders in a string.
///
/// Matches are replaced left to right in a single pass; replacement
/// output is never re-scanned for further placeholders.
pub fn resolve_str(template: &str, model: &Value, options: &ResolveOptions) -> PlaceholderResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut tail = 0;

    for found in pattern().find_iter(template) {
        let placeholder = Placeholder::parse(found.as_str())?;
        let replacement = substitute(&placeholder, model, options);
        debug!(
            "substituted {} -> {}",
            found.as_str(),
            replacement
        );
        out.push_str(&template[tail..found.start()]);
        out.push_str(&replacement);
        tail = found.end();
    }
    out.push_str(&template[tail..]);
    Ok(out)
}

/// True when at least one well-formed placeholder exists anywhere in
/// `template`, recursing through containers.
pub fn has(template: &Value) -> bool {
    match template {
        Value::String(text) => has_str(text),
        Value::Array(items) => items.iter().any(has),
        Value::Object(map) => map.values().any(has),
        _ => false,
    }
}

/// True when the string contains at least one well-formed placeholder.
pub fn has_str(template: &str) -> bool {
    pattern().is_match(template)
}

/// All placeholders in `template`, depth-first, strings left to right.
pub fn placeholders(template: &Value) -> PlaceholderResult<Vec<Placeholder>> {
    let mut found = Vec::new();
    collect(template, &mut found)?;
    Ok(found)
}

/// All placeholders in a string, left to right.
pub fn placeholders_str(template: &str) -> PlaceholderResult<Vec<Placeholder>> {
    pattern()
        .find_iter(template)
        .map(|found| Placeholder::parse(found.as_str()))
        .collect()
}

fn collect(template: &Value, found: &mut Vec<Placeholder>) -> PlaceholderResult<()> {
    match template {
        Value::String(text) => found.extend(placeholders_str(text)?),
        Value::Array(items) => {
            for item in items {
                collect(item, found)?;
            }
        }
        Value::Object(map) => {
            for value in map.values() {
                collect(value, found)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Evaluate one placeholder to its replacement text.
fn substitute(placeholder: &Placeholder, model: &Value, options: &ResolveOptions) -> String {
    let value = placeholder
        .expression
        .as_deref()
        .and_then(|expression| evaluate(expression, model, options));

    // Only the absent value (nothing found, or an explicit null) takes
    // the default; empty strings, zero and false are real values.
    let value = match value {
        None => placeholder.default_value.clone(),
        Some(Value::Null) => placeholder.default_value.clone().or(Some(Value::Null)),
        found => found,
    };

    match &options.replacer {
        Some(replacer) => replacer(
            value.as_ref(),
            placeholder.expression.as_deref(),
            placeholder.metadata.as_ref(),
        ),
        None => default_replacer(value.as_ref()),
    }
}

/// Evaluate an expression against the model.
///
/// `$NAME` reads the environment through the injected reader, and only
/// when trusted; untrusted lookups are unconditionally absent without
/// touching the environment. `.`, `./` and `/` are the model itself; a
/// leading `./` or `/` is stripped before path lookup.
fn evaluate(expression: &str, model: &Value, options: &ResolveOptions) -> Option<Value> {
    if let Some(name) = expression.strip_prefix('$') {
        if !options.trusted {
            return None;
        }
        return (options.env_reader)(name).map(Value::String);
    }

    if matches!(expression, "." | "./" | "/") {
        return Some(model.clone());
    }

    let path = expression
        .strip_prefix("./")
        .or_else(|| expression.strip_prefix('/'))
        .unwrap_or(expression);
    lookup(model, path)
}

/// Plain textual rendering: strings verbatim, scalars in decimal text,
/// null as `null`, absent as `undefined`, containers as compact JSON.
fn default_replacer(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(container) => container.to_string(),
    }
}
