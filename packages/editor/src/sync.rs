//! # Nested Card Synchronization
//!
//! Keeps a project card's `nestedContent` (and the derived `coverImage`)
//! consistent with a nested editing session.
//!
//! ```text
//!            open(parent)                      close()
//! Closed ───────────────────▶ Open(session) ───────────▶ Closed
//!                                  │
//!                 nested change    ▼
//!        guard engaged? ── yes ──▶ skip
//!                 │ no
//!                 ▼
//!        encode + first image ──▶ parent.update_block(card)
//!                 │
//!                 ▼
//!        acknowledge() once the write's echo has been drained
//! ```
//!
//! The guard is released by an explicit acknowledgement from the driver
//! rather than a timer. [`CardSync::pump`] does the whole cycle for a
//! single-threaded driver.

use crate::errors::SyncError;
use crate::surface::{ChangeFeed, EditingSurface};
use folio_document::{find_first_image, Block, BlockKind, EncodedDocument, Props};
use tracing::{debug, info, warn};

pub const PLACEHOLDER_PARAGRAPH: &str = "Start writing about this project...";

/// Engaged while a write-back is in flight
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReentrancyGuard {
    engaged: bool,
}

impl ReentrancyGuard {
    /// Engage unless already engaged; returns whether this call engaged it
    pub fn try_engage(&mut self) -> bool {
        if self.engaged {
            return false;
        }
        self.engaged = true;
        true
    }

    pub fn release(&mut self) {
        self.engaged = false;
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }
}

/// What a nested change led to
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// No pending notifications
    Idle,
    /// Guard engaged; the change was not synced
    Skipped,
    /// Encoding and cover already match the card
    Unchanged,
    /// The card was updated
    Written { cover_image: Option<String> },
}

struct OpenSession<S> {
    surface: S,
    feed: ChangeFeed,
}

/// Synchronizer for one project card
pub struct CardSync<S> {
    card_id: String,
    session: Option<OpenSession<S>>,
    guard: ReentrancyGuard,
    writes: usize,
}

impl<S: EditingSurface> CardSync<S> {
    pub fn new(card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            session: None,
            guard: ReentrancyGuard::default(),
            writes: 0,
        }
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn guard(&self) -> ReentrancyGuard {
        self.guard
    }

    /// Write-backs issued since creation
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Open the nested session, seeding it from the card
    ///
    /// `make_session` receives the decoded nested document, or the default
    /// skeleton when the card has none that decodes.
    pub fn open<P, F>(&mut self, parent: &P, make_session: F) -> Result<&mut S, SyncError>
    where
        P: EditingSurface + ?Sized,
        F: FnOnce(Vec<Block>) -> S,
    {
        let card = lookup_card(parent.document(), &self.card_id)?;
        let initial = initial_nested_document(card);

        let mut surface = make_session(initial);
        let feed = surface.subscribe();
        self.guard.release();

        info!(card = %self.card_id, "Opened nested session");
        let session = self.session.insert(OpenSession { surface, feed });
        Ok(&mut session.surface)
    }

    pub fn session(&self) -> Option<&S> {
        self.session.as_ref().map(|open| &open.surface)
    }

    pub fn session_mut(&mut self) -> Option<&mut S> {
        self.session.as_mut().map(|open| &mut open.surface)
    }

    /// Handle one nested change notification
    ///
    /// On `Written` the guard stays engaged until [`acknowledge`](Self::acknowledge).
    pub fn on_nested_change<P>(&mut self, parent: &mut P) -> Result<SyncOutcome, SyncError>
    where
        P: EditingSurface + ?Sized,
    {
        let session = self.session.as_ref().ok_or(SyncError::NotOpen)?;

        if !self.guard.try_engage() {
            debug!(card = %self.card_id, "Sync in flight - skipping nested change");
            return Ok(SyncOutcome::Skipped);
        }

        let nested = session.surface.document();
        let result = write_back(parent, &self.card_id, nested);

        match result {
            Ok(SyncOutcome::Written { cover_image }) => {
                self.writes += 1;
                Ok(SyncOutcome::Written { cover_image })
            }
            other => {
                // Nothing was written, so no echo will follow
                self.guard.release();
                other
            }
        }
    }

    /// Release the guard after the write's own notifications were observed
    pub fn acknowledge(&mut self) {
        self.guard.release();
    }

    /// Drain pending nested notifications, sync once, then acknowledge
    pub fn pump<P>(&mut self, parent: &mut P) -> Result<SyncOutcome, SyncError>
    where
        P: EditingSurface + ?Sized,
    {
        let pending = match &self.session {
            Some(open) => open.feed.drain().len(),
            None => return Err(SyncError::NotOpen),
        };
        if pending == 0 {
            return Ok(SyncOutcome::Idle);
        }

        let outcome = self.on_nested_change(parent)?;

        // Anything queued now is the echo of our own write
        if let Some(open) = &self.session {
            let echoes = open.feed.drain().len();
            debug!(card = %self.card_id, pending, echoes, "Drained nested notifications");
        }
        self.acknowledge();

        Ok(outcome)
    }

    /// Dismiss the session; the last synced state stays on the card
    pub fn close(&mut self) -> Option<S> {
        self.guard.release();
        let closed = self.session.take().map(|open| open.surface);
        if closed.is_some() {
            info!(card = %self.card_id, "Closed nested session");
        }
        closed
    }
}

/// Decoded nested document, or the default skeleton
pub fn initial_nested_document(card: &Block) -> Vec<Block> {
    let title = card.prop_str("title").unwrap_or_default();

    let Some(encoded) = card.nested_content() else {
        return default_skeleton(title);
    };

    match encoded.decode() {
        Ok(blocks) if !blocks.is_empty() => blocks,
        Ok(_) => {
            warn!(card = ?card.id, "Nested content is empty - using default skeleton");
            default_skeleton(title)
        }
        Err(err) => {
            warn!(
                card = ?card.id,
                error = %err,
                "Nested content did not decode - using default skeleton"
            );
            default_skeleton(title)
        }
    }
}

/// Level-1 heading with the card title, then a placeholder paragraph
pub fn default_skeleton(title: &str) -> Vec<Block> {
    vec![
        Block::heading(1, title),
        Block::paragraph(PLACEHOLDER_PARAGRAPH),
    ]
}

fn lookup_card<'a>(blocks: &'a [Block], card_id: &str) -> Result<&'a Block, SyncError> {
    let block = blocks
        .iter()
        .find_map(|block| block.find(card_id))
        .ok_or_else(|| SyncError::CardNotFound(card_id.to_string()))?;

    if block.kind != BlockKind::ProjectCard {
        return Err(SyncError::NotACard {
            id: card_id.to_string(),
            kind: block.kind.to_string(),
        });
    }
    Ok(block)
}

fn write_back<P>(parent: &mut P, card_id: &str, nested: &[Block]) -> Result<SyncOutcome, SyncError>
where
    P: EditingSurface + ?Sized,
{
    let encoded = EncodedDocument::encode(nested)?;
    let cover = find_first_image(nested);
    let cover_image = (!cover.is_empty()).then_some(cover);

    let card = lookup_card(parent.document(), card_id)?;
    let same_content = card.prop_str("nestedContent") == Some(encoded.as_str());
    let same_cover = match &cover_image {
        Some(url) => card.prop_str("coverImage") == Some(url.as_str()),
        None => true,
    };
    if same_content && same_cover {
        debug!(card = %card_id, "Nested content unchanged - no write");
        return Ok(SyncOutcome::Unchanged);
    }

    let mut props = Props::new().with("nestedContent", encoded.into_string());
    if let Some(url) = &cover_image {
        props.insert("coverImage", url.as_str());
    }
    parent.update_block(card_id, props)?;

    debug!(card = %card_id, cover = ?cover_image, "Synced nested content");
    Ok(SyncOutcome::Written { cover_image })
}
