//! Broadcast channel wrapper for stat change notifications.
//!
//! [`StatEventBus`] is the single notification channel the mutation path
//! publishes into. Publishing is synchronous and never blocks, so the
//! core stat service stays single-threaded; receiving is pull-based, so
//! subscribers (including the replication forwarder) consume at their own
//! pace.

use tokio::sync::broadcast;

use crate::event::StatChanged;

/// Capacity of the broadcast channel for stat change events.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 256;

/// The in-process notification channel for [`StatChanged`] events.
///
/// Cheap to clone -- clones share the same underlying channel. A bus with
/// no subscribers accepts publishes and drops them, which is the normal
/// state before any observer attaches.
#[derive(Debug, Clone)]
pub struct StatEventBus {
    tx: broadcast::Sender<StatChanged>,
}

impl StatEventBus {
    /// Create a bus with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(BROADCAST_CAPACITY)
    }

    /// Create a bus with an explicit capacity.
    ///
    /// Capacity is floored at 1; the underlying channel rejects zero.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to stat change events.
    ///
    /// The receiver yields every event published after this call, in
    /// publish order. Events published earlier are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<StatChanged> {
        self.tx.subscribe()
    }

    /// Publish a stat change to all current subscribers.
    ///
    /// Returns the number of subscribers that received the event.
    /// Returns 0 if nobody is subscribed (this is not an error).
    pub fn publish(&self, event: &StatChanged) -> usize {
        // send returns Err only when there are zero receivers, which is
        // normal when no observer has attached yet.
        self.tx.send(event.clone()).unwrap_or(0)
    }

    /// Number of currently attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for StatEventBus {
    fn default() -> Self {
        Self::new()
    }
}
