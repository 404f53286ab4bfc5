//! Check command - Fail when a template still contains placeholders.
//!
//! Intended for CI: resolved configuration files should carry no
//! leftover markers.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use placehold_core::placeholders;

use super::load_template;

#[derive(Args)]
pub struct CheckArgs {
    /// File to check
    template: PathBuf,
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let template = load_template(&args.template)?;
    let found = placeholders(&template)?;

    if found.is_empty() {
        println!("✅ {} contains no placeholders", args.template.display());
        return Ok(());
    }

    println!("❌ {}:", args.template.display());
    for placeholder in &found {
        println!(
            "   - {}",
            placeholder.expression.as_deref().unwrap_or("<no expression>")
        );
    }
    anyhow::bail!(
        "{} contains {} unresolved placeholder(s)",
        args.template.display(),
        found.len()
    );
}
