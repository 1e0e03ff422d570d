/// Tests for per-block error isolation
///
/// A block that fails to render must become a placeholder without taking the
/// rest of the document down with it.
use crate::output::{OutputNode, Role};
use crate::renderer::{RenderOptions, Renderer, MAX_RENDER_LEVEL, PLACEHOLDER_MESSAGE};
use folio_document::{Block, EncodedDocument};

fn nested_card(levels: usize) -> Block {
    let mut card = Block::project_card("leaf");
    for level in 0..levels {
        let encoded = EncodedDocument::encode(&[card]).unwrap();
        card = Block::project_card(format!("level {}", level))
            .with_prop("nestedContent", encoded.into_string());
    }
    card
}

/// `levels` bullet items, each the only child of the one above, ending in `leaf`
fn deep_list(levels: usize, leaf: Block) -> Block {
    let mut block = leaf;
    for level in (0..levels).rev() {
        block = Block::bullet(format!("item {}", level)).with_child(block);
    }
    block
}

fn placeholders(node: &OutputNode) -> Vec<String> {
    let mut found = Vec::new();
    node.walk(&mut |node| {
        if let OutputNode::Error { message, block_type } = node {
            assert_eq!(message, PLACEHOLDER_MESSAGE);
            found.push(block_type.clone());
        }
    });
    found
}

#[test]
fn test_out_of_range_heading_keeps_its_text() {
    let renderer = Renderer::new(RenderOptions::default());
    let blocks = folio_document::sanitize(&serde_json::json!([
        { "type": "heading", "props": { "level": 4 }, "content": "Level four" },
        { "type": "heading", "props": { "level": 0 }, "content": "Level zero" },
        { "type": "paragraph", "content": "after" }
    ]));
    let nodes = renderer.render_blocks(&blocks, 0);

    assert_eq!(nodes.len(), 3);
    assert!(nodes.iter().all(|node| !matches!(node, OutputNode::Error { .. })));
    assert_eq!(nodes[0].role(), Some(Role::Heading3));
    assert_eq!(nodes[0].text_content(), "Level four");
    assert_eq!(nodes[1].role(), Some(Role::Heading1));
    assert_eq!(nodes[1].text_content(), "Level zero");
    assert_eq!(nodes[2].text_content(), "after");
}

#[test]
fn test_failure_inside_list_children_is_local() {
    // A zero nesting limit makes every card fail
    let renderer = Renderer::new(RenderOptions {
        max_nesting_depth: 0,
        ..Default::default()
    });

    let nodes = renderer.render_blocks(
        &[
            Block::numbered("one").with_child(Block::project_card("c")),
            Block::numbered("two"),
        ],
        0,
    );
    let items = nodes[0].children();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].attr("ordinal"), Some("2"));

    let nested = items[0].find_all(Role::NestedList);
    assert!(matches!(
        &nested[0].children()[0],
        OutputNode::Error { block_type, .. } if block_type == "projectCard"
    ));
}

#[test]
fn test_excessive_card_nesting_is_contained() {
    let renderer = Renderer::new(RenderOptions {
        max_nesting_depth: 3,
        ..Default::default()
    });

    let nodes = renderer.render_blocks(&[nested_card(5), Block::paragraph("still here")], 0);
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[1].text_content(), "still here");

    let mut placeholders = 0;
    nodes[0].walk(&mut |node| {
        if matches!(node, OutputNode::Error { .. }) {
            placeholders += 1;
        }
    });
    assert_eq!(placeholders, 1);
    assert_eq!(nodes[0].find_all(Role::Card).len(), 3);
}

#[test]
fn test_undecodable_nested_content_is_absent() {
    let renderer = Renderer::new(RenderOptions::default());
    for encoded in ["{broken", r#"{"type":"paragraph"}"#, "42"] {
        let card = Block::project_card("Card").with_prop("nestedContent", encoded);
        let nodes = renderer.render_blocks(&[card], 0);

        assert_eq!(nodes[0].role(), Some(Role::Card));
        assert!(nodes[0].find_all(Role::CardBody).is_empty(), "body for {encoded}");
        assert_eq!(nodes[0].text_content(), "Card");
    }
}

#[test]
fn test_deep_lists_across_cards_are_cut_off() {
    // Each card holds its own deep list, so no single encoding is too deep
    let mut inner = Block::paragraph("bottom");
    for index in 0..4 {
        let encoded = EncodedDocument::encode(&[deep_list(50, inner)]).unwrap();
        inner = Block::project_card(format!("card {}", index))
            .with_prop("nestedContent", encoded.into_string());
    }
    let renderer = Renderer::new(RenderOptions::default());
    let nodes = renderer.render_blocks(&[deep_list(90, inner), Block::paragraph("still here")], 0);

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[1].text_content(), "still here");
    assert_eq!(placeholders(&nodes[0]), vec!["bulletListItem".to_string()]);
    assert_eq!(nodes[0].find_all(Role::Card).len(), 1);
}

#[test]
fn test_list_down_to_the_level_cap_renders_fully() {
    let renderer = Renderer::new(RenderOptions::default());

    let at_cap =
        renderer.render_blocks(&[deep_list(MAX_RENDER_LEVEL, Block::paragraph("bottom"))], 0);
    assert!(placeholders(&at_cap[0]).is_empty());
    assert!(at_cap[0].text_content().ends_with("bottom"));

    let past_cap =
        renderer.render_blocks(&[deep_list(MAX_RENDER_LEVEL + 1, Block::paragraph("bottom"))], 0);
    assert_eq!(placeholders(&past_cap[0]), vec!["paragraph".to_string()]);
}
