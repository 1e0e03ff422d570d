//! # Render Pipeline
//!
//! Walks a sanitized block sequence and produces output nodes.
//!
//! ```text
//! Vec<Block> → group_blocks → per-unit render → Vec<OutputNode>
//!                                   ↓ (card)
//!                          decode nestedContent → same pipeline, depth + 1
//! ```
//!
//! Two depths are tracked. `depth` counts enclosing cards and is checked
//! against [`RenderOptions::max_nesting_depth`]. `level` counts every step
//! down the tree, through list children and card bodies alike, and is capped
//! at [`MAX_RENDER_LEVEL`]; each card decode restarts the sanitizer's own
//! depth count, so only the combined level bounds the recursion.
//!
//! ## Error Recovery
//!
//! Every block renders in isolation. A failing block becomes an
//! [`OutputNode::Error`] tagged with its type and the rest of the document
//! still renders. Undecodable card content is treated as absent.

use crate::document::RenderedDocument;
use crate::error::{RenderError, RenderResult};
use crate::grouping::{group_blocks, RenderUnit};
use crate::output::{OutputNode, Role};
use crate::style::Stylesheet;
use chrono::{Local, NaiveDateTime};
use folio_document::{extract_text, Block, BlockKind};
use tracing::{debug, info, instrument, warn};

pub const PLACEHOLDER_MESSAGE: &str = "Error rendering this element";
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 8;
/// Deepest tree level rendered, counting list children and card bodies together
pub const MAX_RENDER_LEVEL: usize = 128;
const UNTITLED: &str = "Untitled document";
const UNTITLED_CARD: &str = "Untitled project";
const BULLET: &str = "•";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub stylesheet: Stylesheet,
    /// Deepest card-inside-card level rendered before failing the card
    pub max_nesting_depth: usize,
    /// Timestamp printed in the footer
    pub exported_at: NaiveDateTime,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            stylesheet: Stylesheet::default(),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            exported_at: Local::now().naive_local(),
        }
    }
}

/// Render with default options, stamped with the current time
pub fn render(blocks: &[Block], title: &str) -> RenderedDocument {
    Renderer::new(RenderOptions::default()).render(blocks, title)
}

pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn sheet(&self) -> &Stylesheet {
        &self.options.stylesheet
    }

    #[instrument(skip_all, fields(blocks = blocks.len()))]
    pub fn render(&self, blocks: &[Block], title: &str) -> RenderedDocument {
        info!("Starting document render");

        let document = RenderedDocument {
            title_node: self.title_node(title),
            output_nodes: self.render_blocks(blocks, 0),
            footer_node: self.footer_node(),
        };

        info!(nodes = document.output_nodes.len(), "Document render complete");
        document
    }

    pub fn title_node(&self, title: &str) -> OutputNode {
        let title = title.trim();
        let title = if title.is_empty() { UNTITLED } else { title };
        OutputNode::element(Role::Title)
            .with_styles(self.sheet().for_role(Role::Title))
            .with_child(OutputNode::text(title))
    }

    pub fn footer_node(&self) -> OutputNode {
        let stamp = self.options.exported_at.format("%Y-%m-%d %H:%M");
        OutputNode::element(Role::Footer)
            .with_styles(self.sheet().for_role(Role::Footer))
            .with_child(OutputNode::text(format!("Exported on {}", stamp)))
            .pinned()
    }

    /// Group, then render each unit; `depth` counts enclosing cards
    pub fn render_blocks(&self, blocks: &[Block], depth: usize) -> Vec<OutputNode> {
        self.render_level(blocks, depth, 0)
    }

    fn render_level(&self, blocks: &[Block], depth: usize, level: usize) -> Vec<OutputNode> {
        let mut nodes = Vec::new();
        for unit in group_blocks(blocks) {
            match unit {
                RenderUnit::Single(block) => {
                    nodes.extend(self.render_isolated(block, None, depth, level));
                }
                RenderUnit::OrderedList(items) => {
                    let list = OutputNode::element(Role::OrderedList)
                        .with_styles(self.sheet().for_role(Role::OrderedList))
                        .with_children(
                            items
                                .into_iter()
                                .enumerate()
                                .filter_map(|(index, item)| {
                                    self.render_isolated(item, Some(index + 1), depth, level)
                                })
                                .collect(),
                        );
                    nodes.push(list);
                }
            }
        }
        nodes
    }

    fn render_isolated(
        &self,
        block: &Block,
        ordinal: Option<usize>,
        depth: usize,
        level: usize,
    ) -> Option<OutputNode> {
        match self.render_block(block, ordinal, depth, level) {
            Ok(node) => node,
            Err(err) => {
                warn!(
                    block_type = %block.kind,
                    error = %err,
                    "Block failed to render - emitting placeholder"
                );
                Some(OutputNode::error(PLACEHOLDER_MESSAGE, block.kind.as_str()))
            }
        }
    }

    fn render_block(
        &self,
        block: &Block,
        ordinal: Option<usize>,
        depth: usize,
        level: usize,
    ) -> RenderResult<Option<OutputNode>> {
        if level > MAX_RENDER_LEVEL {
            return Err(RenderError::TreeTooDeep {
                limit: MAX_RENDER_LEVEL,
            });
        }

        let sheet = self.sheet();
        let node = match &block.kind {
            BlockKind::Heading => {
                let role = Role::heading(heading_level(block));
                Some(
                    OutputNode::element(role)
                        .with_styles(sheet.for_role(role))
                        .with_children(sheet.resolve_inline(&block.content)),
                )
            }

            BlockKind::Paragraph => {
                if extract_text(&block.content).trim().is_empty() {
                    Some(
                        OutputNode::element(Role::Spacer)
                            .with_styles(sheet.for_role(Role::Spacer)),
                    )
                } else {
                    Some(
                        OutputNode::element(Role::Paragraph)
                            .with_styles(sheet.for_role(Role::Paragraph))
                            .with_children(sheet.resolve_inline(&block.content)),
                    )
                }
            }

            BlockKind::BulletListItem => {
                Some(self.list_item(block, BULLET.to_string(), None, depth, level))
            }

            BlockKind::NumberedListItem => {
                // Outside a grouped run (never produced by group_blocks) count from 1
                let ordinal = ordinal.unwrap_or(1);
                Some(self.list_item(block, format!("{}.", ordinal), Some(ordinal), depth, level))
            }

            BlockKind::Image => match block.image_url() {
                None => {
                    debug!("Skipping image without url");
                    None
                }
                Some(url) => Some(self.image(url, block.prop_str("caption"))),
            },

            BlockKind::CodeBlock => {
                let mut node = OutputNode::element(Role::CodeBlock)
                    .with_styles(sheet.for_role(Role::CodeBlock))
                    .with_child(OutputNode::text(extract_text(&block.content)));
                if let Some(language) = block.prop_str("language").filter(|l| !l.is_empty()) {
                    node = node.with_attr("language", language);
                }
                Some(node)
            }

            BlockKind::Quote => Some(
                OutputNode::element(Role::Quote)
                    .with_styles(sheet.for_role(Role::Quote))
                    .with_children(sheet.resolve_inline(&block.content)),
            ),

            BlockKind::Divider => {
                Some(OutputNode::element(Role::Divider).with_styles(sheet.for_role(Role::Divider)))
            }

            BlockKind::ProjectCard => Some(self.card(block, depth, level)?),

            BlockKind::Unknown(tag) => {
                let text = extract_text(&block.content);
                if text.is_empty() {
                    debug!(block_type = %tag, "Dropping unknown block without text");
                    None
                } else {
                    debug!(block_type = %tag, "Rendering unknown block as plain paragraph");
                    Some(
                        OutputNode::element(Role::Paragraph)
                            .with_styles(sheet.for_role(Role::Paragraph))
                            .with_child(OutputNode::text(text)),
                    )
                }
            }
        };
        Ok(node)
    }

    fn list_item(
        &self,
        block: &Block,
        marker: String,
        ordinal: Option<usize>,
        depth: usize,
        level: usize,
    ) -> OutputNode {
        let sheet = self.sheet();
        let mut item = OutputNode::element(Role::ListItem)
            .with_attr("marker", marker)
            .with_styles(sheet.for_role(Role::ListItem))
            .with_children(sheet.resolve_inline(&block.content));

        if let Some(ordinal) = ordinal {
            item = item.with_attr("ordinal", ordinal.to_string());
        }

        if !block.children.is_empty() {
            item = item.with_child(
                OutputNode::element(Role::NestedList)
                    .with_styles(sheet.for_role(Role::NestedList))
                    .with_children(self.render_level(&block.children, depth, level + 1)),
            );
        }
        item
    }

    fn image(&self, url: &str, caption: Option<&str>) -> OutputNode {
        let sheet = self.sheet();
        let mut node = OutputNode::element(Role::Image)
            .with_attr("src", url)
            .with_styles(sheet.for_role(Role::Image));

        if let Some(caption) = caption.map(str::trim).filter(|c| !c.is_empty()) {
            node = node.with_child(
                OutputNode::element(Role::Caption)
                    .with_styles(sheet.for_role(Role::Caption))
                    .with_child(OutputNode::text(caption)),
            );
        }
        node
    }

    fn card(&self, block: &Block, depth: usize, level: usize) -> RenderResult<OutputNode> {
        let limit = self.options.max_nesting_depth;
        if depth >= limit {
            return Err(RenderError::NestingTooDeep { limit });
        }

        let sheet = self.sheet();
        let title = block
            .prop_str("title")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED_CARD);

        let mut card = OutputNode::element(Role::Card)
            .with_styles(sheet.for_role(Role::Card))
            .with_child(
                OutputNode::element(Role::CardTitle)
                    .with_styles(sheet.for_role(Role::CardTitle))
                    .with_child(OutputNode::text(title)),
            );

        if let Some(subtext) = block.prop_str("subtext").filter(|s| !s.trim().is_empty()) {
            card = card.with_child(
                OutputNode::element(Role::CardSubtext)
                    .with_styles(sheet.for_role(Role::CardSubtext))
                    .with_child(OutputNode::text(subtext)),
            );
        }

        if let Some(cover) = block.prop_str("coverImage").filter(|c| !c.is_empty()) {
            card = card.with_child(self.image(cover, None));
        }

        let nested = match block.nested_content().map(|encoded| encoded.decode()) {
            None => Vec::new(),
            Some(Ok(blocks)) => blocks,
            Some(Err(err)) => {
                warn!(card = %title, error = %err, "Ignoring undecodable nested content");
                Vec::new()
            }
        };

        if !nested.is_empty() {
            card = card.with_child(
                OutputNode::element(Role::CardBody)
                    .with_styles(sheet.for_role(Role::CardBody))
                    .with_children(self.render_level(&nested, depth + 1, level + 1)),
            );
        }

        Ok(card)
    }
}

/// Level from `props.level`, clamped to 1..=3; absent, fractional or
/// non-numeric levels mean 1
fn heading_level(block: &Block) -> u8 {
    match block.props.get("level").and_then(|v| v.as_f64()) {
        Some(level) if level.fract() == 0.0 && level >= 3.0 => 3,
        Some(level) if level.fract() == 0.0 && level >= 2.0 => 2,
        _ => 1,
    }
}
