//! Render command - Resolve a template against a model.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use tracing::info;

use placehold_core::{resolve, ResolveOptions};

use super::{load_model, load_template};

#[derive(Args)]
pub struct RenderArgs {
    /// Template file (.json/.yaml resolve structurally, anything else as text)
    template: PathBuf,

    /// Model file (JSON or YAML) the template is resolved against
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Allow {? $VAR} expressions to read environment variables
    #[arg(long)]
    trusted: bool,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn execute(args: RenderArgs) -> Result<()> {
    let template = load_template(&args.template)?;
    let model = match &args.model {
        Some(path) => load_model(path)?,
        None => Value::Null,
    };

    info!("Rendering {}", args.template.display());

    let options = ResolveOptions::new().trusted(args.trusted);
    let resolved = resolve(&template, &model, &options)?;

    // String templates print verbatim, structural ones as pretty JSON.
    let text = match resolved {
        Value::String(text) => text,
        other => serde_json::to_string_pretty(&other)?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{text}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{text}"),
    }

    Ok(())
}
