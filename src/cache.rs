//! Per-parent listing cache.
//!
//! Single source of truth for "what children does parent X currently have,
//! and what is the fetch status." Entries are created lazily on first access,
//! at most one fetch is in flight per key, and mutation-triggered refreshes
//! supersede in-flight fetches via a per-key generation stamp.

use crate::error::GatewayError;
use crate::notify::ChangeNotifier;
use crate::types::{AreaId, FloorId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Opaque, collision-free address of one parent's children listing.
///
/// Keys are only built through the two constructors, so no two distinct
/// parents can share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for the floors listing of an area.
    pub fn floors(area_id: AreaId) -> Self {
        CacheKey(format!("area:{}:floors", area_id))
    }

    /// Key for the spaces listing of a floor.
    pub fn spaces(floor_id: FloorId) -> Self {
        CacheKey(format!("floor:{}:spaces", floor_id))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fetch status of a populated cache slot, as seen by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Loading,
    Ready,
    Failed,
}

/// Snapshot of one cache slot.
///
/// `items` is only meaningful when `status == Ready`; it is empty for
/// `Loading` and `Failed` snapshots.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub status: FetchStatus,
    pub items: Vec<T>,
    pub error: Option<String>,
}

/// Internal slot state. `Idle` is observably identical to an absent key;
/// the slot is retained so its generation stays monotonic across
/// invalidations, which is what keeps orphaned in-flight results out.
enum SlotState<T> {
    Idle,
    Loading,
    Ready(Vec<T>),
    Failed(String),
}

struct Slot<T> {
    generation: u64,
    state: SlotState<T>,
}

impl<T> Slot<T> {
    fn idle() -> Self {
        Slot {
            generation: 0,
            state: SlotState::Idle,
        }
    }
}

/// Keyed store of per-parent fetch results.
///
/// Owned by one view; shared between the coordinators via `Arc`. Adapters
/// read snapshots through [`CacheStore::get`] and never mutate.
pub struct CacheStore<T> {
    slots: RwLock<HashMap<CacheKey, Slot<T>>>,
    notifier: Arc<ChangeNotifier>,
    fetch_timeout: Option<Duration>,
}

impl<T: Clone> CacheStore<T> {
    /// Create an empty store. `fetch_timeout` of `None` disables the
    /// stuck-fetch guard; expiry transitions the slot to `Failed`.
    pub fn new(notifier: Arc<ChangeNotifier>, fetch_timeout: Option<Duration>) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            notifier,
            fetch_timeout,
        }
    }

    /// Snapshot read of one slot. Returns `None` for absent and idle slots.
    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry<T>> {
        let slots = self.slots.read();
        let slot = slots.get(key)?;
        match &slot.state {
            SlotState::Idle => None,
            SlotState::Loading => Some(CacheEntry {
                status: FetchStatus::Loading,
                items: Vec::new(),
                error: None,
            }),
            SlotState::Ready(items) => Some(CacheEntry {
                status: FetchStatus::Ready,
                items: items.clone(),
                error: None,
            }),
            SlotState::Failed(message) => Some(CacheEntry {
                status: FetchStatus::Failed,
                items: Vec::new(),
                error: Some(message.clone()),
            }),
        }
    }

    /// Make sure the listing for `key` is loaded or loading.
    ///
    /// - An in-flight fetch suppresses this call entirely (duplicate guard).
    /// - A `Ready` slot is a cache hit unless `force` is set.
    /// - Otherwise the slot transitions to `Loading` and the fetcher runs.
    ///   The result is applied only if the slot's generation is unchanged;
    ///   a result orphaned by an interleaved invalidation is discarded.
    pub async fn ensure<F, Fut>(&self, key: &CacheKey, parent_id: u64, force: bool, fetcher: F)
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = Result<Vec<T>, GatewayError>>,
    {
        let generation = {
            let mut slots = self.slots.write();
            let slot = slots.entry(key.clone()).or_insert_with(Slot::idle);
            match &slot.state {
                SlotState::Loading => {
                    debug!(key = %key, "fetch already in flight, suppressing duplicate");
                    return;
                }
                SlotState::Ready(_) if !force => {
                    debug!(key = %key, "cache hit");
                    return;
                }
                _ => {}
            }
            slot.generation += 1;
            slot.state = SlotState::Loading;
            slot.generation
        };
        self.notifier.notify();
        debug!(key = %key, parent_id, generation, "fetching children listing");

        let result = match self.fetch_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, fetcher(parent_id)).await {
                Ok(result) => result,
                Err(_) => Err(GatewayError::Timeout(timeout.as_millis() as u64)),
            },
            None => fetcher(parent_id).await,
        };

        {
            let mut slots = self.slots.write();
            let Some(slot) = slots.get_mut(key) else {
                return;
            };
            if slot.generation != generation {
                debug!(key = %key, generation, "discarding superseded fetch result");
                return;
            }
            match result {
                Ok(items) => {
                    debug!(key = %key, count = items.len(), "listing ready");
                    slot.state = SlotState::Ready(items);
                }
                Err(error) => {
                    warn!(key = %key, error = %error, "listing fetch failed");
                    slot.state = SlotState::Failed(error.to_string());
                }
            }
        }
        self.notifier.notify();
    }

    /// Drop the listing for `key`; the next `ensure` refetches it.
    ///
    /// Bumping the generation here is what makes a forced refresh supersede
    /// an in-flight plain fetch for the same key.
    pub fn invalidate(&self, key: &CacheKey) {
        {
            let mut slots = self.slots.write();
            let Some(slot) = slots.get_mut(key) else {
                return;
            };
            slot.generation += 1;
            slot.state = SlotState::Idle;
        }
        debug!(key = %key, "invalidated cache slot");
        self.notifier.notify();
    }

    /// Discard the cached listing and refetch regardless of current status.
    /// Used after mutations.
    pub async fn force_refresh<F, Fut>(&self, key: &CacheKey, parent_id: u64, fetcher: F)
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = Result<Vec<T>, GatewayError>>,
    {
        self.invalidate(key);
        self.ensure(key, parent_id, true, fetcher).await;
    }
}
