//! # Blocks
//!
//! A document is an ordered `Vec<Block>`. Each block carries a kind, a
//! primitive property bag, optional inline content and optional children.
//!
//! The wire form follows the editor's JSON shape:
//!
//! ```text
//! { "id": "b1", "type": "heading", "props": { "level": 2 },
//!   "content": [ { "type": "text", "text": "Hi" } ], "children": [] }
//! ```
//!
//! Serialization is derived; deserialization always goes through
//! [`crate::sanitize`] so that malformed input degrades instead of failing.

use crate::codec::EncodedDocument;
use crate::inline::Inline;
use crate::props::{PropValue, Props};
use serde::{Serialize, Serializer};
use std::fmt;

/// Closed set of block types plus a fallback for anything else
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    Paragraph,
    BulletListItem,
    NumberedListItem,
    Image,
    CodeBlock,
    Quote,
    Divider,
    ProjectCard,
    /// Unrecognized type; keeps the raw tag so it survives a round trip
    Unknown(String),
}

impl BlockKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "heading" => BlockKind::Heading,
            "paragraph" => BlockKind::Paragraph,
            "bulletListItem" => BlockKind::BulletListItem,
            "numberedListItem" => BlockKind::NumberedListItem,
            "image" => BlockKind::Image,
            "codeBlock" => BlockKind::CodeBlock,
            "quote" => BlockKind::Quote,
            "divider" => BlockKind::Divider,
            "projectCard" => BlockKind::ProjectCard,
            other => BlockKind::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BlockKind::Heading => "heading",
            BlockKind::Paragraph => "paragraph",
            BlockKind::BulletListItem => "bulletListItem",
            BlockKind::NumberedListItem => "numberedListItem",
            BlockKind::Image => "image",
            BlockKind::CodeBlock => "codeBlock",
            BlockKind::Quote => "quote",
            BlockKind::Divider => "divider",
            BlockKind::ProjectCard => "projectCard",
            BlockKind::Unknown(tag) => tag,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, BlockKind::Unknown(_))
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BlockKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One node of the document tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub kind: BlockKind,

    #[serde(skip_serializing_if = "Props::is_empty")]
    pub props: Props,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Inline>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: None,
            kind,
            props: Props::new(),
            content: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn heading(level: i64, text: impl Into<String>) -> Self {
        Self::new(BlockKind::Heading)
            .with_prop("level", level)
            .with_text(text)
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph).with_text(text)
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Self::new(BlockKind::BulletListItem).with_text(text)
    }

    pub fn numbered(text: impl Into<String>) -> Self {
        Self::new(BlockKind::NumberedListItem).with_text(text)
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::new(BlockKind::Image).with_prop("url", url.into())
    }

    /// Card with the given title and empty subtext, cover and nested content
    pub fn project_card(title: impl Into<String>) -> Self {
        Self::new(BlockKind::ProjectCard)
            .with_prop("title", title.into())
            .with_prop("subtext", "")
            .with_prop("coverImage", "")
            .with_prop("nestedContent", "")
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key, value);
        self
    }

    /// Append an unstyled text span
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(Inline::text(text));
        self
    }

    pub fn with_content(mut self, content: Vec<Inline>) -> Self {
        self.content.extend(content);
        self
    }

    pub fn with_child(mut self, child: Block) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children.extend(children);
        self
    }

    /// String prop lookup
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get_str(key)
    }

    /// Non-empty `url` prop
    pub fn image_url(&self) -> Option<&str> {
        self.prop_str("url").filter(|url| !url.is_empty())
    }

    /// Encoded nested document of a card, if one is stored
    pub fn nested_content(&self) -> Option<EncodedDocument> {
        self.prop_str("nestedContent")
            .filter(|encoded| !encoded.trim().is_empty())
            .map(EncodedDocument::from_raw)
    }

    /// Depth-first search through `children` by id
    pub fn find(&self, id: &str) -> Option<&Block> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Block> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }
}
