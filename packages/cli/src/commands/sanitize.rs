use super::resolve;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use folio_document::sanitize as sanitize_blocks;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SanitizeArgs {
    /// JSON block document to clean
    pub input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn sanitize(args: SanitizeArgs, cwd: &str) -> Result<()> {
    let path = resolve(cwd, &args.input);
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let raw: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not JSON", path.display()))?;

    let blocks = sanitize_blocks(&raw);
    let total = raw.as_array().map_or(0, Vec::len);
    let cleaned = serde_json::to_string_pretty(&blocks)?;

    match args.output {
        Some(output) => {
            let output = resolve(cwd, &output);
            fs::write(&output, cleaned)?;
            eprintln!("  {} {} → {}", "✓".green(), path.display(), output.display());
        }
        None => println!("{}", cleaned),
    }

    let dropped = total.saturating_sub(blocks.len());
    if dropped > 0 {
        eprintln!(
            "{} Kept {} of {} top-level blocks",
            "⚠️".yellow(),
            blocks.len(),
            total
        );
    }

    Ok(())
}
