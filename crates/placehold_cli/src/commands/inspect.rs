//! Inspect command - List the placeholders a template contains.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use placehold_core::placeholders;

use super::load_template;

#[derive(Args)]
pub struct InspectArgs {
    /// Template file to inspect
    template: PathBuf,

    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let template = load_template(&args.template)?;
    let found = placeholders(&template)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("No placeholders in {}", args.template.display());
        return Ok(());
    }

    println!(
        "{} placeholder(s) in {}:",
        found.len(),
        args.template.display()
    );
    for (index, placeholder) in found.iter().enumerate() {
        println!(
            "  {}. {}",
            index + 1,
            placeholder.expression.as_deref().unwrap_or("<no expression>")
        );
        if let Some(default_value) = &placeholder.default_value {
            println!("     default: {default_value}");
        }
        if let Some(metadata) = &placeholder.metadata {
            println!("     metadata: {metadata}");
        }
    }

    Ok(())
}
