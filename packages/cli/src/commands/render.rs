use super::read_document;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use folio_export::Renderer;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// JSON block document to render
    pub input: PathBuf,

    /// Document title (defaults to "Untitled document")
    #[arg(short, long, default_value = "")]
    pub title: String,
}

/// Print the output-node tree a page renderer would receive
pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = read_document(cwd, &args.input)?;

    let renderer = Renderer::new(config.render_options());
    let rendered = renderer.render(document.blocks(), &args.title);
    info!(nodes = rendered.output_nodes.len(), "Rendered document");

    println!("{}", serde_json::to_string_pretty(&rendered)?);
    Ok(())
}
