//! Error types for the document model

use thiserror::Error;

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Malformed document encoding: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Encoded document is not a block sequence (found {found})")]
    NotASequence { found: &'static str },
}
