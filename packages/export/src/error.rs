//! Error types for the export pipeline

use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

/// Failure while rendering a single block. Never escapes the pipeline: the
/// block is replaced by a placeholder node instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Block tree exceeds {limit} levels")]
    TreeTooDeep { limit: usize },

    #[error("Card nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
}
