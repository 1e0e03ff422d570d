//! Inline content: styled text runs, links, and block-shaped nodes embedded
//! in a content array.

use crate::block::Block;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Style flags of a text run. All default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Styles {
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub code: bool,
}

impl Styles {
    pub const FLAGS: [&'static str; 5] = ["bold", "italic", "underline", "strikethrough", "code"];

    pub fn is_empty(&self) -> bool {
        *self == Styles::default()
    }

    /// Set a flag by its wire name; unknown names are ignored
    pub fn set(&mut self, flag: &str, on: bool) {
        match flag {
            "bold" => self.bold = on,
            "italic" => self.italic = on,
            "underline" => self.underline = on,
            "strikethrough" => self.strikethrough = on,
            "code" => self.code = on,
            _ => {}
        }
    }

    pub fn bold() -> Self {
        Styles {
            bold: true,
            ..Default::default()
        }
    }

    pub fn italic() -> Self {
        Styles {
            italic: true,
            ..Default::default()
        }
    }

    pub fn code() -> Self {
        Styles {
            code: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text { text: String, styles: Styles },

    /// `href` is `None` when the source carried no string href
    Link { href: Option<String>, content: Vec<Inline> },

    /// A block-shaped node found inside a content array
    Embedded(Box<Block>),
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text {
            text: text.into(),
            styles: Styles::default(),
        }
    }

    pub fn styled(text: impl Into<String>, styles: Styles) -> Self {
        Inline::Text {
            text: text.into(),
            styles,
        }
    }

    pub fn link(href: impl Into<String>, content: Vec<Inline>) -> Self {
        Inline::Link {
            href: Some(href.into()),
            content,
        }
    }

    pub fn embedded(block: Block) -> Self {
        Inline::Embedded(Box::new(block))
    }
}

impl Serialize for Inline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Inline::Text { text, styles } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "text")?;
                map.serialize_entry("text", text)?;
                if !styles.is_empty() {
                    map.serialize_entry("styles", styles)?;
                }
                map.end()
            }
            Inline::Link { href, content } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "link")?;
                if let Some(href) = href {
                    map.serialize_entry("href", href)?;
                }
                map.serialize_entry("content", content)?;
                map.end()
            }
            Inline::Embedded(block) => block.serialize(serializer),
        }
    }
}
