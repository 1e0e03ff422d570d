//! Nested card synchronization against a parent that echoes its writes

use folio_editor::{
    Block, CardSync, ChangeEvent, ChangeFeed, ChangeNotifier, Document, EditingSurface,
    EditorError, Props, SyncOutcome,
};
use folio_document::{find_first_image, EncodedDocument, Inline};
use std::cell::RefCell;
use std::rc::Rc;

type SharedNotifier = Rc<RefCell<ChangeNotifier>>;

/// Nested session whose change feed is shared with the parent, so a parent
/// write shows up as a nested change the way a re-rendered editor emits one
struct EchoSession {
    doc: Document,
    notifier: SharedNotifier,
}

impl EchoSession {
    fn edit(&mut self, blocks: Vec<Block>) {
        self.doc.replace(blocks).unwrap();
        self.notifier.borrow_mut().notify(ChangeEvent {
            version: self.doc.version,
            block_id: None,
        });
    }
}

impl EditingSurface for EchoSession {
    fn document(&self) -> &[Block] {
        self.doc.blocks()
    }

    fn update_block(&mut self, block_id: &str, props: Props) -> Result<(), EditorError> {
        self.doc.update_block(block_id, props)
    }

    fn subscribe(&mut self) -> ChangeFeed {
        self.notifier.borrow_mut().subscribe()
    }
}

struct EchoingParent {
    doc: Document,
    notifier: SharedNotifier,
}

impl EditingSurface for EchoingParent {
    fn document(&self) -> &[Block] {
        self.doc.blocks()
    }

    fn update_block(&mut self, block_id: &str, props: Props) -> Result<(), EditorError> {
        self.doc.update_block(block_id, props)?;
        self.notifier.borrow_mut().notify(ChangeEvent {
            version: self.doc.version,
            block_id: Some(block_id.to_string()),
        });
        Ok(())
    }

    fn subscribe(&mut self) -> ChangeFeed {
        self.doc.subscribe()
    }
}

fn setup() -> (EchoingParent, CardSync<EchoSession>) {
    let notifier: SharedNotifier = Rc::default();
    let parent = EchoingParent {
        doc: Document::new(vec![Block::project_card("Bridge").with_id("card")]),
        notifier: notifier.clone(),
    };

    let mut sync = CardSync::new("card");
    sync.open(&parent, |blocks| EchoSession {
        doc: Document::new(blocks),
        notifier,
    })
    .unwrap();

    (parent, sync)
}

#[test]
fn test_rapid_changes_while_guarded_write_once() {
    let (mut parent, mut sync) = setup();
    sync.session_mut()
        .unwrap()
        .edit(vec![Block::paragraph("first draft")]);

    let first = sync.on_nested_change(&mut parent).unwrap();
    assert!(matches!(first, SyncOutcome::Written { .. }));

    for n in 0..10 {
        sync.session_mut()
            .unwrap()
            .edit(vec![Block::paragraph(format!("draft {}", n))]);
        assert_eq!(
            sync.on_nested_change(&mut parent).unwrap(),
            SyncOutcome::Skipped
        );
    }
    assert_eq!(sync.writes(), 1);
    assert_eq!(parent.doc.version, 1);
}

#[test]
fn test_echo_never_amplifies() {
    let (mut parent, mut sync) = setup();
    sync.session_mut()
        .unwrap()
        .edit(vec![Block::paragraph("hello")]);

    assert!(matches!(
        sync.pump(&mut parent).unwrap(),
        SyncOutcome::Written { .. }
    ));

    // The echo was drained with the write; nothing is left to process
    for _ in 0..5 {
        assert_eq!(sync.pump(&mut parent).unwrap(), SyncOutcome::Idle);
    }
    assert_eq!(sync.writes(), 1);
    assert!(!sync.guard().is_engaged());
}

#[test]
fn test_unguarded_echo_is_a_no_op() {
    let (mut parent, mut sync) = setup();
    sync.session_mut()
        .unwrap()
        .edit(vec![Block::paragraph("hello")]);

    sync.on_nested_change(&mut parent).unwrap();
    // Release early, then process the echo as an ordinary change
    sync.acknowledge();

    assert_eq!(
        sync.on_nested_change(&mut parent).unwrap(),
        SyncOutcome::Unchanged
    );
    assert_eq!(sync.writes(), 1);
}

#[test]
fn test_every_acknowledged_change_is_written() {
    let (mut parent, mut sync) = setup();

    for n in 0..3 {
        sync.session_mut()
            .unwrap()
            .edit(vec![Block::paragraph(format!("v{}", n))]);
        sync.pump(&mut parent).unwrap();
    }
    assert_eq!(sync.writes(), 3);

    let card = parent.doc.find("card").unwrap();
    let stored = card.nested_content().unwrap().decode().unwrap();
    assert_eq!(stored, vec![Block::paragraph("v2")]);
}

#[test]
fn test_cover_image_comes_from_content_only() {
    let (mut parent, mut sync) = setup();

    let nested = vec![
        Block::paragraph("intro").with_child(Block::image("child.png")),
        Block::paragraph("gallery")
            .with_content(vec![Inline::link(
                "#",
                vec![Inline::embedded(Block::image("inline.png"))],
            )]),
        Block::image("later.png"),
    ];
    assert_eq!(find_first_image(&nested), "inline.png");

    sync.session_mut().unwrap().edit(nested);
    let outcome = sync.pump(&mut parent).unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::Written {
            cover_image: Some("inline.png".to_string())
        }
    );
    assert_eq!(
        parent.doc.find("card").unwrap().prop_str("coverImage"),
        Some("inline.png")
    );
}

#[test]
fn test_reopen_resumes_from_synced_state() {
    let (mut parent, mut sync) = setup();
    sync.session_mut()
        .unwrap()
        .edit(vec![Block::heading(2, "Kept")]);
    sync.pump(&mut parent).unwrap();
    sync.close();

    let reopened = sync
        .open(&parent, |blocks| EchoSession {
            doc: Document::new(blocks),
            notifier: Rc::default(),
        })
        .unwrap();
    assert_eq!(reopened.document(), &[Block::heading(2, "Kept")]);
}

#[test]
fn test_card_with_stored_content_opens_it() {
    let encoded = EncodedDocument::encode(&[Block::paragraph("saved")]).unwrap();
    let mut parent = Document::new(vec![Block::project_card("Bridge")
        .with_id("card")
        .with_prop("nestedContent", encoded.into_string())]);

    let mut sync = CardSync::new("card");
    let session = sync.open(&parent, Document::new).unwrap();
    assert_eq!(session.blocks(), &[Block::paragraph("saved")]);

    session.replace(vec![Block::paragraph("edited")]).unwrap();
    assert_eq!(
        sync.pump(&mut parent).unwrap(),
        SyncOutcome::Written { cover_image: None }
    );
    assert_eq!(sync.pump(&mut parent).unwrap(), SyncOutcome::Idle);

    let stored = parent.find("card").unwrap().nested_content().unwrap();
    assert_eq!(stored.decode().unwrap(), vec![Block::paragraph("edited")]);
}
