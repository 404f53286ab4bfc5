//! CLI command definitions.
//!
//! Each subcommand maps to one operation of the placeholder engine:
//! render a template against a model, inspect its placeholders, or
//! check that none remain.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

pub mod check;
pub mod inspect;
pub mod render;

/// placehold - resolve {? ...} placeholders against a model
#[derive(Parser)]
#[command(name = "placehold")]
#[command(version, about = "placehold - resolve {? ...} placeholders against a model")]
#[command(long_about = r#"
placehold substitutes {? expression : default | metadata} markers in
template files against a JSON or YAML model.

COMMANDS:
  render   → Resolve a template against a model and print the result
  inspect  → List the placeholders a template contains
  check    → Fail when a template still contains placeholders

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Unresolved placeholders (check)
  4 - Template error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a template against a model
    Render(render::RenderArgs),

    /// List the placeholders a template contains
    Inspect(inspect::InspectArgs),

    /// Fail when a template still contains placeholders
    Check(check::CheckArgs),
}

/// Load a template file. `.json` and `.yaml`/`.yml` files resolve
/// structurally; any other file is a plain text template.
pub(crate) fn load_template(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read template {}", path.display()))?;

    match extension(path) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON template {}", path.display())),
        Some("yaml" | "yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML template {}", path.display())),
        _ => Ok(Value::String(content)),
    }
}

/// Load a model file, JSON or YAML by extension.
pub(crate) fn load_model(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read model {}", path.display()))?;

    match extension(path) {
        Some("yaml" | "yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML model {}", path.display())),
        _ => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON model {}", path.display())),
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}
