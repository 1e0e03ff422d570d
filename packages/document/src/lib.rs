//! # Folio Document
//!
//! The block document model shared by the editor and the exporter.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ raw JSON (editor state, storage, nested)    │
//! └─────────────────────────────────────────────┘
//!                     ↓  sanitize()
//! ┌─────────────────────────────────────────────┐
//! │ Vec<Block>                                  │
//! │  - closed BlockKind set + Unknown fallback  │
//! │  - primitive-only Props                     │
//! │  - Inline spans (text, link, embedded)      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ search: first image, plain text             │
//! │ codec: nested documents inside card props   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Sanitize at the boundary**: nothing enters the model without passing
//!    through [`sanitize`]; it never fails, it only drops.
//! 2. **Props hold primitives**: [`PropValue`] cannot represent objects or
//!    arrays, so nested documents travel as [`EncodedDocument`] strings.
//! 3. **Serialization is a fixed point**: serializing a sanitized document
//!    and sanitizing it again yields the same document.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_document::{sanitize, find_first_image, Block};
//!
//! let raw = serde_json::json!([
//!     { "type": "heading", "props": { "level": 2 }, "content": "Hello" },
//!     { "type": "image", "props": { "url": "cover.png" } },
//! ]);
//!
//! let blocks = sanitize(&raw);
//! assert_eq!(find_first_image(&blocks), "cover.png");
//! ```

mod block;
mod codec;
mod error;
mod inline;
mod props;
mod sanitize;
mod search;

pub use block::{Block, BlockKind};
pub use codec::EncodedDocument;
pub use error::{DocumentError, DocumentResult};
pub use inline::{Inline, Styles};
pub use props::{PropValue, Props};
pub use sanitize::{sanitize, sanitize_str, RESERVED_KEY_PREFIX};
pub use search::{extract_text, find_first_image, PlainText};
