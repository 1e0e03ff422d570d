//! Debounced persistence
//!
//! Changes inside the window coalesce; only the latest state is written
//! once the window has passed without another change. Time is passed in so
//! a driver can use its own clock.

use crate::store::{DocumentStore, StoreKey};
use folio_document::Block;
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_AUTOSAVE_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct PendingSave {
    blocks: Vec<Block>,
    due: Instant,
    coalesced: usize,
}

#[derive(Debug)]
pub struct Autosave {
    key: StoreKey,
    window: Duration,
    pending: Option<PendingSave>,
}

impl Autosave {
    pub fn new(key: StoreKey, window: Duration) -> Self {
        Self {
            key,
            window,
            pending: None,
        }
    }

    pub fn key(&self) -> &StoreKey {
        &self.key
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record the latest state and push the deadline out
    pub fn schedule(&mut self, blocks: Vec<Block>, now: Instant) {
        let due = now + self.window;
        let coalesced = self.pending.as_ref().map_or(0, |p| p.coalesced + 1);
        self.pending = Some(PendingSave {
            blocks,
            due,
            coalesced,
        });
    }

    /// Write if the window has passed; returns whether a write happened
    pub fn poll<S>(&mut self, store: &mut S, now: Instant) -> bool
    where
        S: DocumentStore + ?Sized,
    {
        let due = matches!(&self.pending, Some(pending) if now >= pending.due);
        due && self.flush(store)
    }

    /// Write any pending state now
    pub fn flush<S>(&mut self, store: &mut S) -> bool
    where
        S: DocumentStore + ?Sized,
    {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        debug!(key = %self.key, coalesced = pending.coalesced, "Autosave flush");
        store.save(&self.key, &pending.blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_changes_coalesce() {
        let mut store = MemoryStore::new();
        let mut autosave = Autosave::new(StoreKey::default(), Duration::from_millis(100));
        let start = Instant::now();

        autosave.schedule(vec![Block::paragraph("a")], start);
        autosave.schedule(
            vec![Block::paragraph("b")],
            start + Duration::from_millis(50),
        );

        // The second change pushed the deadline out
        assert!(!autosave.poll(&mut store, start + Duration::from_millis(120)));
        assert!(!store.exists(&StoreKey::default()));

        assert!(autosave.poll(&mut store, start + Duration::from_millis(150)));
        assert!(!autosave.is_pending());
        assert_eq!(
            store.load(&StoreKey::default()),
            Some(vec![Block::paragraph("b")])
        );
    }

    #[test]
    fn test_flush_writes_immediately() {
        let mut store = MemoryStore::new();
        let mut autosave = Autosave::new(StoreKey::new("draft"), DEFAULT_AUTOSAVE_WINDOW);

        assert!(!autosave.flush(&mut store));
        autosave.schedule(vec![Block::paragraph("x")], Instant::now());
        assert!(autosave.flush(&mut store));
        assert!(store.exists(&StoreKey::new("draft")));
    }
}
