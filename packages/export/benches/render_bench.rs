use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio_document::{Block, EncodedDocument, Inline, Styles};
use folio_export::{RenderOptions, Renderer};

fn sample_document(sections: usize) -> Vec<Block> {
    let mut blocks = Vec::new();
    for section in 0..sections {
        blocks.push(Block::heading(2, format!("Section {}", section)));
        blocks.push(Block::paragraph("Intro ").with_content(vec![
            Inline::styled("bold", Styles::bold()),
            Inline::link("https://folio.dev", vec![Inline::text(" link")]),
        ]));
        for item in 0..5 {
            blocks.push(Block::numbered(format!("Step {}", item)));
        }
        blocks.push(Block::bullet("Note").with_child(Block::bullet("Sub note")));
        blocks.push(Block::image(format!("image-{}.png", section)));
    }
    blocks
}

fn render_flat_document(c: &mut Criterion) {
    let blocks = sample_document(50);
    let renderer = Renderer::new(RenderOptions::default());

    c.bench_function("render_flat_document", |b| {
        b.iter(|| renderer.render(black_box(&blocks), "Bench"))
    });
}

fn render_nested_cards(c: &mut Criterion) {
    let nested = EncodedDocument::encode(&sample_document(5)).unwrap();
    let blocks: Vec<Block> = (0..20)
        .map(|i| {
            Block::project_card(format!("Card {}", i))
                .with_prop("nestedContent", nested.as_str())
        })
        .collect();
    let renderer = Renderer::new(RenderOptions::default());

    c.bench_function("render_nested_cards", |b| {
        b.iter(|| renderer.render(black_box(&blocks), "Bench"))
    });
}

criterion_group!(benches, render_flat_document, render_nested_cards);
criterion_main!(benches);
