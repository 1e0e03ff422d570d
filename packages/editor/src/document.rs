//! # Document Handle
//!
//! In-memory block document with a version counter and change feeds.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Sanitize → Edit → Notify → Save / Export
//!   ↓        ↓         ↓        ↓          ↓
//! JSON   Vec<Block> Mutations  Feeds   Store / Renderer
//! ```
//!
//! Every way in goes through the sanitizer, so a `Document` only ever holds
//! well-formed blocks.

use crate::errors::EditorError;
use crate::mutations::{find_block, Mutation, MutationResult};
use crate::surface::{ChangeEvent, ChangeFeed, ChangeNotifier, EditingSurface};
use folio_document::{sanitize, Block, DocumentError, Props};
use serde_json::Value;
use tracing::debug;

/// Editable block document
#[derive(Debug, Default)]
pub struct Document {
    /// Current version number (increments on each applied mutation)
    pub version: u64,

    blocks: Vec<Block>,
    notifier: ChangeNotifier,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            version: 0,
            blocks,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Build from untrusted JSON, dropping whatever does not sanitize
    pub fn from_value(raw: &Value) -> Self {
        Self::new(sanitize(raw))
    }

    /// Parse and sanitize JSON text; only unparseable text is an error
    pub fn from_json(text: &str) -> Result<Self, EditorError> {
        let raw: Value = serde_json::from_str(text).map_err(DocumentError::Malformed)?;
        Ok(Self::from_value(&raw))
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        let text = serde_json::to_string_pretty(&self.blocks).map_err(DocumentError::Encode)?;
        Ok(text)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn find(&self, id: &str) -> Option<&Block> {
        find_block(&self.blocks, id)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Apply a mutation and notify subscribers
    ///
    /// A rejected mutation leaves blocks and version untouched.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        mutation.apply(&mut self.blocks)?;
        self.version += 1;

        debug!(version = self.version, target = ?mutation.target(), "Applied mutation");
        self.notifier.notify(ChangeEvent {
            version: self.version,
            block_id: mutation.target().map(str::to_string),
        });

        Ok(MutationResult {
            version: self.version,
        })
    }

    /// Replace every block, as an import does
    pub fn replace(&mut self, blocks: Vec<Block>) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::ReplaceDocument { blocks })
    }
}

impl EditingSurface for Document {
    fn document(&self) -> &[Block] {
        &self.blocks
    }

    fn update_block(&mut self, block_id: &str, props: Props) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateProps {
            block_id: block_id.to_string(),
            props,
        })?;
        Ok(())
    }

    fn subscribe(&mut self) -> ChangeFeed {
        self.notifier.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutations::MutationError;
    use serde_json::json;

    #[test]
    fn test_from_value_sanitizes() {
        let doc = Document::from_value(&json!([
            { "type": "paragraph", "content": "kept" },
            { "content": "no type" },
            42
        ]));

        assert_eq!(doc.version, 0);
        assert_eq!(doc.blocks().len(), 1);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Document::from_json("{not json"),
            Err(EditorError::Document(DocumentError::Malformed(_)))
        ));
        assert!(Document::from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn test_version_increments_on_success_only() {
        let mut doc = Document::new(vec![Block::paragraph("a").with_id("p")]);

        let ok = doc.update_block("p", Props::new().with("textColor", "red"));
        assert!(ok.is_ok());
        assert_eq!(doc.version, 1);

        let err = doc.update_block("missing", Props::new());
        assert!(matches!(
            err,
            Err(EditorError::Mutation(MutationError::BlockNotFound(_)))
        ));
        assert_eq!(doc.version, 1);
    }

    #[test]
    fn test_subscribers_see_changes() {
        let mut doc = Document::new(vec![Block::paragraph("a").with_id("p")]);
        let feed = doc.subscribe();

        doc.update_block("p", Props::new().with("k", "v")).unwrap();
        doc.replace(vec![]).unwrap();

        let events = feed.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].block_id.as_deref(), Some("p"));
        assert_eq!(events[1].version, 2);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_to_json_reloads_identically() {
        let doc = Document::new(vec![
            Block::heading(2, "Title").with_id("h"),
            Block::project_card("Card").with_id("c"),
        ]);
        let reloaded = Document::from_json(&doc.to_json().unwrap()).unwrap();

        assert_eq!(reloaded.blocks(), doc.blocks());
    }
}
