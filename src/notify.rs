//! Change notification for presentation adapters.
//!
//! The core has no rendering concept. Adapters subscribe to a monotonically
//! increasing revision counter and re-read snapshots (`CacheStore::get`,
//! expansion queries) whenever it changes.

use tokio::sync::watch;

/// Revision-counter change notifier backed by a `tokio::sync::watch` channel.
#[derive(Debug)]
pub struct ChangeNotifier {
    tx: watch::Sender<u64>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    /// Bump the revision. Cheap when nobody is subscribed.
    pub fn notify(&self) {
        self.tx.send_modify(|revision| *revision += 1);
    }

    /// Subscribe to revision changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    /// Current revision, for snapshot comparisons in tests and adapters.
    pub fn revision(&self) -> u64 {
        *self.tx.borrow()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}
