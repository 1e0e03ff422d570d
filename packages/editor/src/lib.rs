//! # Folio Editor
//!
//! Document editing engine: live documents, nested card sessions,
//! persistence and export.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: blocks, sanitizer, codec, search  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Apply mutations with validation          │
//! │  - Sync nested card sessions                │
//! │  - Persist under a store key                │
//! │  - Drive async exports                      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ export: blocks → output nodes               │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Sanitize at every boundary**: loads, decodes and exports all pass
//!    through the sanitizer
//! 2. **One writer per card**: a nested session writes back through
//!    [`CardSync`] only, guarded against its own echo
//! 3. **Export never mutates**: the live document is captured, not borrowed
//!    mutably
//!
//! ## Usage
//!
//! ### Editing a card's nested document
//!
//! ```rust,ignore
//! use folio_editor::{CardSync, Document, EditingSurface};
//!
//! let mut parent = Document::from_json(&text)?;
//! let mut sync = CardSync::new("card-1");
//! let nested = sync.open(&parent, Document::new)?;
//!
//! nested.apply(mutation)?;
//! sync.pump(&mut parent)?;
//! ```
//!
//! ### Exporting
//!
//! ```rust,ignore
//! use folio_editor::{ExportOptions, Exporter};
//!
//! let exporter = Exporter::new(renderer, ExportOptions::default());
//! let artifact = exporter.export(parent.blocks(), "Portfolio").await?;
//! ```

mod autosave;
mod card_edit;
mod document;
mod errors;
mod export;
mod mutations;
mod store;
mod surface;
mod sync;

pub use autosave::{Autosave, DEFAULT_AUTOSAVE_WINDOW};
pub use card_edit::CardDraft;
pub use document::Document;
pub use errors::{EditorError, ExportError, RendererError, StoreError, SyncError};
pub use export::{
    artifact_name, Artifact, ExportOptions, ExportStatus, Exporter, PageRenderer, RenderRequest,
    DEFAULT_BASENAME,
};
pub use mutations::{find_block, find_block_mut, Mutation, MutationError, MutationResult};
pub use store::{
    decode_stored, DocumentStore, FileBackend, FileStore, JsonStore, MemoryBackend, MemoryStore,
    StoreBackend, StoreKey, DEFAULT_STORE_KEY,
};
pub use surface::{ChangeEvent, ChangeFeed, ChangeNotifier, EditingSurface};
pub use sync::{
    default_skeleton, initial_nested_document, CardSync, ReentrancyGuard, SyncOutcome,
    PLACEHOLDER_PARAGRAPH,
};

// Re-export common types for convenience
pub use folio_document::{Block, BlockKind, Props};
pub use folio_export::{DocumentInfo, RenderedDocument};
