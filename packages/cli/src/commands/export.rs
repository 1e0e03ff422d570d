use super::{read_document, resolve};
use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use folio_editor::{
    Document, DocumentStore, Exporter, FileStore, PageRenderer, RenderRequest, RendererError,
};
use futures::future::BoxFuture;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// JSON block document (defaults to the stored document)
    pub input: Option<PathBuf>,

    /// Document title
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

/// Writes the laid-out tree and document info as JSON
///
/// Stands in for a paginating backend: every page-level decision is already
/// in the tree.
pub struct LayoutJsonRenderer;

impl PageRenderer for LayoutJsonRenderer {
    fn file_extension(&self) -> &str {
        "layout.json"
    }

    fn render<'a>(
        &'a self,
        request: &'a RenderRequest,
    ) -> BoxFuture<'a, Result<Vec<u8>, RendererError>> {
        Box::pin(async move {
            let payload = json!({
                "info": request.info,
                "document": request.document,
            });
            serde_json::to_vec_pretty(&payload).map_err(RendererError::new)
        })
    }
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let document = match &args.input {
        Some(input) => read_document(cwd, input)?,
        None => {
            let mut store = FileStore::open(config.get_data_dir(cwd));
            let key = config.store_key();
            if !store.exists(&key) {
                bail!("No input given and nothing stored under {}", key);
            }
            // An empty stored document goes through so the exporter reports it
            Document::new(store.load(&key).unwrap_or_default())
        }
    };

    let exporter = Exporter::new(LayoutJsonRenderer, config.export_options());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let artifact = runtime.block_on(exporter.export(document.blocks(), &args.title))?;

    let out_dir = match &args.out_dir {
        Some(dir) => resolve(cwd, dir),
        None => config.get_output_dir(cwd),
    };
    fs::create_dir_all(&out_dir)?;
    let output_file = out_dir.join(&artifact.file_name);
    fs::write(&output_file, &artifact.bytes)?;

    println!("{} Exported → {}", "✅".green(), output_file.display());
    Ok(())
}
