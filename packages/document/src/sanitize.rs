//! # Content Sanitizer
//!
//! Turns any JSON value into a valid `Vec<Block>`. The sanitizer is total:
//! malformed entries are dropped, never reported as errors.
//!
//! ## Rules
//!
//! - Object keys starting with [`RESERVED_KEY_PREFIX`] are invisible at every
//!   level (editor-internal bookkeeping never leaks into documents).
//! - A block must be an object with a non-empty string `type`.
//! - `id` is kept when it is a string.
//! - `props` keeps only primitive values.
//! - `content` is coerced to a span list: a bare string becomes one text
//!   span, arrays are sanitized item by item, anything else is empty.
//! - `children` are sanitized recursively; non-block entries are dropped.
//!
//! Output re-sanitizes to itself: `sanitize(to_json(sanitize(x))) == sanitize(x)`.

use crate::block::{Block, BlockKind};
use crate::inline::{Inline, Styles};
use crate::props::{PropValue, Props};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Keys starting with this prefix are treated as editor-internal and dropped
pub const RESERVED_KEY_PREFIX: &str = "_";

/// Nesting beyond this depth is cut off rather than risking the stack
const MAX_TREE_DEPTH: usize = 96;

/// Sanitize an arbitrary value into a block sequence
pub fn sanitize(raw: &Value) -> Vec<Block> {
    let Value::Array(items) = raw else {
        debug!(found = kind_name(raw), "Top-level value is not a block sequence");
        return Vec::new();
    };

    let blocks = sanitize_blocks(items, 0);
    if blocks.len() < items.len() {
        debug!(
            accepted = blocks.len(),
            dropped = items.len() - blocks.len(),
            "Dropped invalid top-level entries"
        );
    }
    blocks
}

/// Parse JSON text and sanitize it; unparseable text yields an empty document
pub fn sanitize_str(text: &str) -> Vec<Block> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => sanitize(&value),
        Err(e) => {
            warn!(error = %e, "Discarding unparseable document text");
            Vec::new()
        }
    }
}

fn sanitize_blocks(items: &[Value], depth: usize) -> Vec<Block> {
    if depth > MAX_TREE_DEPTH {
        warn!(depth, "Block tree too deep - dropping nested entries");
        return Vec::new();
    }
    items
        .iter()
        .filter_map(|item| sanitize_block(item, depth))
        .collect()
}

fn sanitize_block(value: &Value, depth: usize) -> Option<Block> {
    let object = value.as_object()?;
    let tag = block_tag(object)?;

    let mut block = Block::new(BlockKind::parse(tag));

    for (key, field) in plain_entries(object) {
        match (key.as_str(), field) {
            ("id", Value::String(id)) => block.id = Some(id.clone()),
            ("props", Value::Object(props)) => block.props = sanitize_props(props),
            ("content", content) => block.content = sanitize_content(content, depth),
            ("children", Value::Array(children)) => {
                block.children = sanitize_blocks(children, depth + 1)
            }
            _ => {}
        }
    }

    Some(block)
}

fn block_tag(object: &Map<String, Value>) -> Option<&str> {
    match object.get("type") {
        Some(Value::String(tag)) if !tag.is_empty() => Some(tag),
        _ => None,
    }
}

fn sanitize_props(props: &Map<String, Value>) -> Props {
    plain_entries(props)
        .filter_map(|(key, value)| PropValue::from_value(value).map(|v| (key.clone(), v)))
        .collect()
}

fn sanitize_content(content: &Value, depth: usize) -> Vec<Inline> {
    match content {
        Value::String(text) => vec![Inline::text(text.clone())],
        Value::Array(items) if depth <= MAX_TREE_DEPTH => items
            .iter()
            .filter_map(|item| sanitize_inline(item, depth))
            .collect(),
        _ => Vec::new(),
    }
}

fn sanitize_inline(value: &Value, depth: usize) -> Option<Inline> {
    let object = match value {
        Value::String(text) => return Some(Inline::text(text.clone())),
        Value::Object(object) => object,
        _ => return None,
    };

    match block_tag(object)? {
        "text" => {
            let text = match object.get("text") {
                Some(Value::String(text)) => text.clone(),
                _ => String::new(),
            };
            let styles = match object.get("styles") {
                Some(Value::Object(flags)) => sanitize_styles(flags),
                _ => Styles::default(),
            };
            Some(Inline::Text { text, styles })
        }
        "link" => {
            let href = match object.get("href") {
                Some(Value::String(href)) => Some(href.clone()),
                _ => None,
            };
            let content = object
                .get("content")
                .map(|content| sanitize_content(content, depth + 1))
                .unwrap_or_default();
            Some(Inline::Link { href, content })
        }
        _ => sanitize_block(value, depth + 1).map(Inline::embedded),
    }
}

fn sanitize_styles(flags: &Map<String, Value>) -> Styles {
    let mut styles = Styles::default();
    for (flag, value) in plain_entries(flags) {
        if let Value::Bool(on) = value {
            styles.set(flag, *on);
        }
    }
    styles
}

fn plain_entries(object: &Map<String, Value>) -> impl Iterator<Item = (&String, &Value)> {
    object
        .iter()
        .filter(|(key, _)| !key.starts_with(RESERVED_KEY_PREFIX))
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_array_inputs_yield_nothing() {
        for raw in [json!(null), json!({}), json!("text"), json!(42), json!(true)] {
            assert!(sanitize(&raw).is_empty(), "expected empty for {raw}");
        }
    }

    #[test]
    fn test_drops_entries_without_type() {
        let raw = json!([
            null,
            7,
            "paragraph",
            { "props": {} },
            { "type": "" },
            { "type": 3 },
            { "type": "paragraph" }
        ]);

        let blocks = sanitize(&raw);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_props_keep_only_primitives() {
        let raw = json!([{
            "type": "image",
            "props": {
                "url": "a.png",
                "width": 320,
                "visible": true,
                "caption": null,
                "nested": { "x": 1 },
                "list": [1, 2],
                "_internal": "secret"
            }
        }]);

        let props = &sanitize(&raw)[0].props;
        assert_eq!(props.len(), 4);
        assert_eq!(props.get_str("url"), Some("a.png"));
        assert_eq!(props.get("caption"), Some(&PropValue::Null));
        assert!(props.get("nested").is_none());
        assert!(props.get("list").is_none());
        assert!(props.get("_internal").is_none());
    }

    #[test]
    fn test_string_content_becomes_text_span() {
        let blocks = sanitize(&json!([{ "type": "madeUpType", "content": "hello" }]));
        assert_eq!(blocks[0].kind, BlockKind::Unknown("madeUpType".into()));
        assert_eq!(blocks[0].content, vec![Inline::text("hello")]);
    }

    #[test]
    fn test_non_array_content_is_emptied() {
        let blocks = sanitize(&json!([
            { "type": "paragraph", "content": { "type": "tableContent" } }
        ]));
        assert!(blocks[0].content.is_empty());
    }

    #[test]
    fn test_inline_items_are_sanitized() {
        let raw = json!([{
            "type": "paragraph",
            "content": [
                "plain",
                { "type": "text", "text": "bold", "styles": { "bold": true, "italic": "yes", "textColor": "red" } },
                { "type": "link", "href": 5, "content": "click" },
                { "type": "image", "props": { "url": "inline.png" } },
                { "text": "no type" },
                12
            ]
        }]);

        let content = &sanitize(&raw)[0].content;
        assert_eq!(content.len(), 4);
        assert_eq!(content[0], Inline::text("plain"));
        assert_eq!(content[1], Inline::styled("bold", Styles::bold()));
        assert_eq!(
            content[2],
            Inline::Link { href: None, content: vec![Inline::text("click")] }
        );
        assert!(matches!(
            &content[3],
            Inline::Embedded(block) if block.image_url() == Some("inline.png")
        ));
    }

    #[test]
    fn test_children_are_recursively_sanitized() {
        let raw = json!([{
            "type": "bulletListItem",
            "children": [
                { "type": "bulletListItem", "id": "kept" },
                "junk",
                { "id": "no-type" }
            ]
        }]);

        let blocks = sanitize(&raw);
        assert_eq!(blocks[0].children.len(), 1);
        assert_eq!(blocks[0].children[0].id.as_deref(), Some("kept"));
    }

    #[test]
    fn test_reserved_keys_are_invisible() {
        let raw = json!([{ "type": "paragraph", "_type": "heading", "content": [
            { "type": "text", "text": "x", "styles": { "_bold": true } }
        ]}]);

        let blocks = sanitize(&raw);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(blocks[0].content, vec![Inline::text("x")]);
    }

    #[test]
    fn test_non_string_id_is_dropped() {
        let blocks = sanitize(&json!([{ "type": "divider", "id": 12 }]));
        assert_eq!(blocks[0].id, None);
    }

    #[test]
    fn test_unparseable_text_is_empty() {
        assert!(sanitize_str("{not json").is_empty());
        assert_eq!(sanitize_str(r#"[{"type":"quote"}]"#).len(), 1);
    }

    #[test]
    fn test_deep_trees_are_cut_off() {
        let mut raw = json!({ "type": "bulletListItem" });
        for _ in 0..(MAX_TREE_DEPTH + 10) {
            raw = json!({ "type": "bulletListItem", "children": [raw] });
        }

        let blocks = sanitize(&json!([raw]));
        let mut depth = 0;
        let mut cursor = &blocks[0];
        while let Some(child) = cursor.children.first() {
            depth += 1;
            cursor = child;
        }
        assert!(depth <= MAX_TREE_DEPTH + 1);
    }
}
