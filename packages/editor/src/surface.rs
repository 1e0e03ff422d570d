//! # Editing Surface
//!
//! The seam between document logic and whatever hosts the live editor.
//! The in-memory [`Document`](crate::Document) implements it; a nested card
//! session is any other implementation.
//!
//! Change notification is a channel per subscriber. Dropping the
//! [`ChangeFeed`] unsubscribes: the next notification finds the receiver
//! gone and prunes the sender.

use crate::errors::EditorError;
use folio_document::{Block, Props};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// One observed change
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// Document version after the change
    pub version: u64,
    /// Block the change targeted, if it targeted one
    pub block_id: Option<String>,
}

/// Receiving end of a subscription
#[derive(Debug)]
pub struct ChangeFeed {
    receiver: Receiver<ChangeEvent>,
}

impl ChangeFeed {
    /// Next queued event, if any
    pub fn try_next(&self) -> Option<ChangeEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Take every queued event
    pub fn drain(&self) -> Vec<ChangeEvent> {
        self.receiver.try_iter().collect()
    }
}

/// Fan-out of change events to live feeds
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    subscribers: Vec<Sender<ChangeEvent>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> ChangeFeed {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        ChangeFeed { receiver }
    }

    /// Deliver to every feed, dropping the ones that were released
    pub fn notify(&mut self, event: ChangeEvent) {
        self.subscribers
            .retain(|sender| sender.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

pub trait EditingSurface {
    /// Current block sequence
    fn document(&self) -> &[Block];

    /// Merge `props` into the block with `block_id`, searching the whole tree
    fn update_block(&mut self, block_id: &str, props: Props) -> Result<(), EditorError>;

    /// Register for change notifications
    fn subscribe(&mut self) -> ChangeFeed;
}
