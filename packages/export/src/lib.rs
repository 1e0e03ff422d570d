//! # Folio Export
//!
//! Turns a block document into styled output nodes for a page-layout
//! renderer.
//!
//! ## Pipeline
//!
//! 1. **Grouping**: consecutive numbered items become one ordered list so
//!    ordinals are contiguous and restart after any other block.
//! 2. **Per-block rules**: each block kind maps to one output role; unknown
//!    kinds fall back to a plain paragraph when they carry text.
//! 3. **Inline resolution**: span flags flatten to presentation attributes.
//! 4. **Assembly**: title first, body, then a footer pinned to every page.
//!
//! ## Determinism Contract
//!
//! Given the same blocks, title and [`RenderOptions`], `render` produces the
//! same tree. Style maps are ordered; the only clock input is
//! `RenderOptions::exported_at`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_document::sanitize;
//! use folio_export::{Renderer, RenderOptions};
//!
//! let blocks = sanitize(&raw);
//! let rendered = Renderer::new(RenderOptions::default()).render(&blocks, "Portfolio");
//! ```

pub mod document;
pub mod error;
pub mod grouping;
pub mod output;
pub mod renderer;
pub mod style;

#[cfg(test)]
mod tests_error_recovery;

pub use document::{DocumentInfo, RenderedDocument};
pub use error::{RenderError, RenderResult};
pub use grouping::{group_blocks, RenderUnit};
pub use output::{OutputNode, Role};
pub use renderer::{
    render, RenderOptions, Renderer, DEFAULT_MAX_NESTING_DEPTH, MAX_RENDER_LEVEL,
    PLACEHOLDER_MESSAGE,
};
pub use style::Stylesheet;
