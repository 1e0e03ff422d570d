//! # Styles
//!
//! Fixed presentation choices for each output role, and resolution of inline
//! span flags into flattened text-run attributes.
//!
//! ## Inline resolution
//!
//! | flag | attribute |
//! |---|---|
//! | bold | `fontWeight: bold` |
//! | italic | `fontStyle: italic` |
//! | underline | `textDecoration: underline` |
//! | strikethrough | `textDecoration: line-through` |
//! | code | `fontFamily`, `backgroundColor`, `fontSize` |
//!
//! Underline and strikethrough share the decoration channel; when both are
//! set the values combine (`underline line-through`).

use crate::output::{OutputNode, Role};
use folio_document::{Inline, PlainText, Styles};
use std::collections::BTreeMap;

/// Presentation constants consumed by the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    pub body_font: String,
    pub body_font_size: f32,
    pub heading_sizes: [f32; 3],
    pub code_font: String,
    pub code_font_size: f32,
    pub code_background: String,
    pub accent_color: String,
    pub link_color: String,
    pub muted_color: String,
    pub image_max_width: f32,
    pub image_max_height: f32,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            body_font: "Helvetica".to_string(),
            body_font_size: 11.0,
            heading_sizes: [24.0, 18.0, 14.0],
            code_font: "Courier".to_string(),
            code_font_size: 10.0,
            code_background: "#f3f4f6".to_string(),
            accent_color: "#d1d5db".to_string(),
            link_color: "#2563eb".to_string(),
            muted_color: "#6b7280".to_string(),
            image_max_width: 480.0,
            image_max_height: 320.0,
        }
    }
}

fn pt(value: f32) -> String {
    format!("{}", value)
}

fn map(entries: &[(&str, String)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

impl Stylesheet {
    /// Box styles for a role
    pub fn for_role(&self, role: Role) -> BTreeMap<String, String> {
        match role {
            Role::Title => map(&[
                ("fontSize", pt(self.heading_sizes[0] + 4.0)),
                ("fontWeight", "bold".into()),
                ("marginBottom", pt(16.0)),
            ]),
            Role::Footer => map(&[
                ("fontSize", pt(8.0)),
                ("color", self.muted_color.clone()),
                ("textAlign", "center".into()),
            ]),
            Role::Heading1 | Role::Heading2 | Role::Heading3 => {
                let index = match role {
                    Role::Heading1 => 0,
                    Role::Heading2 => 1,
                    _ => 2,
                };
                map(&[
                    ("fontSize", pt(self.heading_sizes[index])),
                    ("fontWeight", "bold".into()),
                    ("marginTop", pt(12.0 - 2.0 * index as f32)),
                    ("marginBottom", pt(6.0)),
                ])
            }
            Role::Paragraph => map(&[
                ("fontFamily", self.body_font.clone()),
                ("fontSize", pt(self.body_font_size)),
                ("marginBottom", pt(6.0)),
            ]),
            Role::Spacer => map(&[("height", pt(self.body_font_size))]),
            Role::OrderedList => map(&[("marginBottom", pt(6.0))]),
            Role::ListItem => map(&[
                ("fontSize", pt(self.body_font_size)),
                ("marginBottom", pt(2.0)),
            ]),
            Role::NestedList => map(&[("paddingLeft", pt(14.0))]),
            Role::Image => map(&[
                ("maxWidth", pt(self.image_max_width)),
                ("maxHeight", pt(self.image_max_height)),
                ("objectFit", "contain".into()),
                ("marginBottom", pt(8.0)),
            ]),
            Role::Caption => map(&[
                ("fontSize", pt(self.body_font_size - 2.0)),
                ("color", self.muted_color.clone()),
                ("textAlign", "center".into()),
            ]),
            Role::CodeBlock => map(&[
                ("fontFamily", self.code_font.clone()),
                ("fontSize", pt(self.code_font_size)),
                ("backgroundColor", self.code_background.clone()),
                ("padding", pt(8.0)),
                ("marginBottom", pt(8.0)),
            ]),
            Role::Quote => map(&[
                ("borderLeftWidth", pt(3.0)),
                ("borderLeftColor", self.accent_color.clone()),
                ("paddingLeft", pt(10.0)),
                ("fontStyle", "italic".into()),
                ("marginBottom", pt(8.0)),
            ]),
            Role::Divider => map(&[
                ("borderBottomWidth", pt(1.0)),
                ("borderBottomColor", self.accent_color.clone()),
                ("marginVertical", pt(10.0)),
            ]),
            Role::Card => map(&[
                ("borderWidth", pt(1.0)),
                ("borderColor", self.accent_color.clone()),
                ("borderRadius", pt(6.0)),
                ("padding", pt(12.0)),
                ("marginBottom", pt(10.0)),
            ]),
            Role::CardTitle => map(&[
                ("fontSize", pt(self.heading_sizes[2])),
                ("fontWeight", "bold".into()),
            ]),
            Role::CardSubtext => map(&[
                ("fontSize", pt(self.body_font_size - 1.0)),
                ("color", self.muted_color.clone()),
            ]),
            Role::CardBody => map(&[("marginTop", pt(8.0))]),
            Role::Link => map(&[
                ("color", self.link_color.clone()),
                ("textDecoration", "underline".into()),
            ]),
        }
    }

    /// Flatten span flags into run attributes
    pub fn run_styles(&self, styles: &Styles) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        if styles.bold {
            out.insert("fontWeight".to_string(), "bold".to_string());
        }
        if styles.italic {
            out.insert("fontStyle".to_string(), "italic".to_string());
        }

        let decoration: Vec<&str> = [
            (styles.underline, "underline"),
            (styles.strikethrough, "line-through"),
        ]
        .into_iter()
        .filter_map(|(on, value)| on.then_some(value))
        .collect();
        if !decoration.is_empty() {
            out.insert("textDecoration".to_string(), decoration.join(" "));
        }

        if styles.code {
            out.insert("fontFamily".to_string(), self.code_font.clone());
            out.insert("backgroundColor".to_string(), self.code_background.clone());
            out.insert("fontSize".to_string(), pt(self.code_font_size));
        }
        out
    }

    /// Resolve inline content into text runs and link boxes
    pub fn resolve_inline(&self, content: &[Inline]) -> Vec<OutputNode> {
        content
            .iter()
            .filter_map(|inline| match inline {
                Inline::Text { text, styles } => {
                    Some(OutputNode::styled_text(text.clone(), self.run_styles(styles)))
                }
                Inline::Link { href, content } => Some(
                    OutputNode::element(Role::Link)
                        .with_attr("href", href.as_deref().unwrap_or("#"))
                        .with_styles(self.for_role(Role::Link))
                        .with_children(self.resolve_inline(content)),
                ),
                // Embedded blocks contribute their text only
                Inline::Embedded(block) => {
                    let text = block.plain_text();
                    (!text.is_empty()).then(|| OutputNode::text(text))
                }
            })
            .collect()
    }
}
