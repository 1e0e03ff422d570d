pub mod export;
pub mod render;
pub mod sanitize;
pub mod store;

pub use export::{export, ExportArgs};
pub use render::{render, RenderArgs};
pub use sanitize::{sanitize, SanitizeArgs};
pub use store::{clear, save, SaveArgs};

use anyhow::{Context, Result};
use folio_editor::Document;
use std::path::{Path, PathBuf};

/// Resolve a user-supplied path against the working directory
pub fn resolve(cwd: &str, path: &Path) -> PathBuf {
    PathBuf::from(cwd).join(path)
}

/// Read and sanitize a JSON block document from disk
pub fn read_document(cwd: &str, input: &Path) -> Result<Document> {
    let path = resolve(cwd, input);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let document = Document::from_json(&text)
        .with_context(|| format!("{} is not a JSON document", path.display()))?;
    Ok(document)
}
