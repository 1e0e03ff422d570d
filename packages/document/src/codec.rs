//! # Nested Document Codec
//!
//! A card keeps its nested document inside its property bag. Props only hold
//! primitives, so the nested `Vec<Block>` is stored as JSON text wrapped in
//! [`EncodedDocument`]. Decoding is always fallible and always sanitizes.

use crate::block::Block;
use crate::error::{DocumentError, DocumentResult};
use crate::sanitize::{kind_name, sanitize};
use serde_json::Value;

/// Opaque serialized block sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDocument(String);

impl EncodedDocument {
    pub fn encode(blocks: &[Block]) -> DocumentResult<Self> {
        serde_json::to_string(blocks)
            .map(EncodedDocument)
            .map_err(DocumentError::Encode)
    }

    /// Wrap text read from a property bag without validating it
    pub fn from_raw(encoded: impl Into<String>) -> Self {
        EncodedDocument(encoded.into())
    }

    /// Decode and sanitize. An empty sequence is a successful decode.
    pub fn decode(&self) -> DocumentResult<Vec<Block>> {
        let value: Value = serde_json::from_str(&self.0).map_err(DocumentError::Malformed)?;
        match &value {
            Value::Array(_) => Ok(sanitize(&value)),
            other => Err(DocumentError::NotASequence {
                found: kind_name(other),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
