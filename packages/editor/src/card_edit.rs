//! Title and subtext drafts for project cards
//!
//! Edits collect in a local draft. Confirming writes straight to the card's
//! props; cancelling drops the draft and leaves the card as it was.

use crate::errors::SyncError;
use crate::surface::EditingSurface;
use folio_document::{BlockKind, Props};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct CardDraft {
    card_id: String,
    pub title: String,
    pub subtext: String,
    original_title: String,
    original_subtext: String,
}

impl CardDraft {
    /// Start a draft from the card's current title and subtext
    pub fn begin<P>(parent: &P, card_id: &str) -> Result<Self, SyncError>
    where
        P: EditingSurface + ?Sized,
    {
        let card = parent
            .document()
            .iter()
            .find_map(|block| block.find(card_id))
            .ok_or_else(|| SyncError::CardNotFound(card_id.to_string()))?;

        if card.kind != BlockKind::ProjectCard {
            return Err(SyncError::NotACard {
                id: card_id.to_string(),
                kind: card.kind.to_string(),
            });
        }

        let title = card.prop_str("title").unwrap_or_default().to_string();
        let subtext = card.prop_str("subtext").unwrap_or_default().to_string();
        Ok(Self {
            card_id: card_id.to_string(),
            original_title: title.clone(),
            original_subtext: subtext.clone(),
            title,
            subtext,
        })
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_subtext(&mut self, subtext: impl Into<String>) {
        self.subtext = subtext.into();
    }

    pub fn is_dirty(&self) -> bool {
        self.title != self.original_title || self.subtext != self.original_subtext
    }

    /// Write title and subtext to the card
    pub fn confirm<P>(self, parent: &mut P) -> Result<(), SyncError>
    where
        P: EditingSurface + ?Sized,
    {
        let props = Props::new()
            .with("title", self.title)
            .with("subtext", self.subtext);
        parent.update_block(&self.card_id, props)?;

        debug!(card = %self.card_id, "Confirmed card draft");
        Ok(())
    }

    pub fn cancel(self) {
        debug!(card = %self.card_id, dirty = self.is_dirty(), "Discarded card draft");
    }
}
