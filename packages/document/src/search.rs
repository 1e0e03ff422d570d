//! Read-only traversals over the block model

use crate::block::{Block, BlockKind};
use crate::inline::Inline;

/// URL of the first image block, or an empty string.
///
/// Depth-first, left to right. Only the `content` axis is searched: a
/// block's `children` are never visited.
pub fn find_first_image(blocks: &[Block]) -> String {
    blocks
        .iter()
        .find_map(image_in_block)
        .map(str::to_owned)
        .unwrap_or_default()
}

fn image_in_block(block: &Block) -> Option<&str> {
    if block.kind == BlockKind::Image {
        if let Some(url) = block.image_url() {
            return Some(url);
        }
    }
    image_in_content(&block.content)
}

fn image_in_content(content: &[Inline]) -> Option<&str> {
    content.iter().find_map(|inline| match inline {
        Inline::Embedded(block) => image_in_block(block),
        Inline::Link { content, .. } => image_in_content(content),
        Inline::Text { .. } => None,
    })
}

/// Anything that flattens to plain text
pub trait PlainText {
    fn plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain_text(&mut out);
        out
    }

    fn write_plain_text(&self, out: &mut String);
}

impl PlainText for str {
    fn write_plain_text(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl PlainText for Inline {
    fn write_plain_text(&self, out: &mut String) {
        match self {
            Inline::Text { text, .. } => out.push_str(text),
            Inline::Link { content, .. } => content.write_plain_text(out),
            Inline::Embedded(block) => block.write_plain_text(out),
        }
    }
}

impl PlainText for [Inline] {
    fn write_plain_text(&self, out: &mut String) {
        for inline in self {
            inline.write_plain_text(out);
        }
    }
}

impl PlainText for Vec<Inline> {
    fn write_plain_text(&self, out: &mut String) {
        self.as_slice().write_plain_text(out);
    }
}

/// A block's text is its inline content; children are not included
impl PlainText for Block {
    fn write_plain_text(&self, out: &mut String) {
        self.content.write_plain_text(out);
    }
}

/// Concatenate all text in `content`, in order, without separators
pub fn extract_text<T: PlainText + ?Sized>(content: &T) -> String {
    content.plain_text()
}
