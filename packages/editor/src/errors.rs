//! Error types for the editor

use crate::mutations::MutationError;
use folio_document::DocumentError;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("No nested session is open")]
    NotOpen,

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Block {id} is a {kind}, not a project card")]
    NotACard { id: String, kind: String },

    #[error("Could not encode nested document: {0}")]
    Encode(#[from] DocumentError),

    #[error(transparent)]
    Editor(#[from] EditorError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not encode document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Stored document is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Stored document is not a block sequence")]
    NotASequence,

    #[error("Stored document is empty")]
    Empty,
}

/// Failure reported by a page-layout renderer
#[derive(Debug, Clone, PartialEq)]
pub struct RendererError(String);

impl RendererError {
    pub fn new(description: impl fmt::Display) -> Self {
        RendererError(description.to_string())
    }

    pub fn description(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for RendererError {}

/// Export failures. `Display` is the single user-facing message.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export")]
    NothingToExport,

    #[error("An export is already in progress")]
    AlreadyPending,

    #[error("Could not capture the document: {0}")]
    Capture(#[from] serde_json::Error),

    #[error("Export failed: {0}")]
    Renderer(#[source] RendererError),
}
