//! Property-style checks for the sanitizer over a corpus of awkward inputs

use folio_document::{sanitize, Block, Inline, PropValue};
use serde_json::{json, Value};

fn corpus() -> Vec<Value> {
    vec![
        json!(null),
        json!({}),
        json!("a string"),
        json!(3.5),
        json!([]),
        json!([1, "two", null, [], {}]),
        json!({ "type": "paragraph" }),
        json!([
            { "type": "heading", "id": "h", "props": { "level": 2, "textColor": "default" }, "content": "Head" },
            { "type": "paragraph", "content": [
                { "type": "text", "text": "mixed ", "styles": { "bold": true, "italic": 1 } },
                { "type": "link", "href": "https://folio.dev", "content": [{ "type": "text", "text": "link" }] },
                { "type": "link", "content": "bare" }
            ]},
            { "type": "bulletListItem", "children": [
                { "type": "numberedListItem", "props": { "deep": { "no": true } } },
                42
            ]},
            { "type": "projectCard", "props": {
                "title": "Card",
                "nestedContent": "[{\"type\":\"image\",\"props\":{\"url\":\"n.png\"}}]",
                "tags": ["a"]
            }},
            { "type": "madeUpType", "content": "hello", "_secret": true },
            { "type": "image", "props": { "url": "x.png", "_cache": "drop" } },
            { "type": "paragraph", "content": [{ "type": "image", "props": { "url": "inline.png" } }] }
        ]),
    ]
}

fn assert_primitive_props(blocks: &[Block]) {
    for block in blocks {
        for (key, value) in block.props.iter() {
            assert!(!key.starts_with('_'), "reserved key {key} leaked");
            assert!(matches!(
                value,
                PropValue::Null | PropValue::Bool(_) | PropValue::Number(_) | PropValue::String(_)
            ));
        }
        assert_primitive_props(&block.children);
        for inline in &block.content {
            if let Inline::Embedded(embedded) = inline {
                assert_primitive_props(std::slice::from_ref(embedded.as_ref()));
            }
        }
    }
}

#[test]
fn test_sanitize_is_idempotent() {
    for raw in corpus() {
        let once = sanitize(&raw);
        let reserialized = serde_json::to_value(&once).unwrap();
        let twice = sanitize(&reserialized);
        assert_eq!(once, twice, "not a fixed point for {raw}");
    }
}

#[test]
fn test_sanitize_is_total() {
    for raw in corpus() {
        // Never panics; always a sequence
        let _ = sanitize(&raw).len();
    }
}

#[test]
fn test_props_are_primitive_only() {
    for raw in corpus() {
        assert_primitive_props(&sanitize(&raw));
    }
}

#[test]
fn test_mixed_document_keeps_valid_blocks() {
    let blocks = sanitize(&corpus()[7]);
    assert_eq!(blocks.len(), 7);

    let card = &blocks[3];
    assert!(card.props.get("tags").is_none());
    assert_eq!(card.nested_content().unwrap().decode().unwrap().len(), 1);

    let list = &blocks[2];
    assert_eq!(list.children.len(), 1);
    assert!(list.children[0].props.is_empty());
}

#[test]
fn test_empty_sequence_sanitizes_to_empty() {
    assert_eq!(sanitize(&json!([])).len(), 0);
}
