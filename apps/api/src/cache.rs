//! In-memory cache-aside map with per-entry TTL and single-flight fills.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::OnceCell;
use tokio::time::Instant;

/// Concurrent misses for the same key share one fill: the first caller runs
/// its fetch future, later callers await the same cell. A failed fill leaves
/// the cell empty and releases the slot so the next request retries. Entries
/// expire a fixed TTL after the slot was created; there is no other eviction.
///
/// The map lock is a plain `Mutex` and is never held across an await.
pub struct TtlCache<K, V> {
    ttl: Duration,
    slots: Mutex<HashMap<K, Slot<V>>>,
}

struct Slot<V> {
    expires_at: Instant,
    cell: Arc<OnceCell<V>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key`, running `fetch` to fill it on a
    /// miss or after expiry. A hit returns the stored value unmodified.
    pub async fn get_or_fetch<E, F, Fut>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = self.slot(&key);
        match cell.get_or_try_init(fetch).await {
            Ok(value) => Ok(value.clone()),
            Err(err) => {
                self.release_failed(&key, &cell);
                Err(err)
            }
        }
    }

    /// Returns the live cell for `key`, replacing an expired slot with a
    /// fresh empty one.
    fn slot(&self, key: &K) -> Arc<OnceCell<V>> {
        let mut slots = self.slots.lock().expect("cache lock poisoned");
        let now = Instant::now();
        match slots.get(key) {
            Some(slot) if slot.expires_at > now => slot.cell.clone(),
            _ => {
                let cell = Arc::new(OnceCell::new());
                slots.insert(
                    key.clone(),
                    Slot {
                        expires_at: now + self.ttl,
                        cell: cell.clone(),
                    },
                );
                cell
            }
        }
    }

    /// Drops the slot for `key` if it still holds `cell` and the fill never
    /// completed, so the next request retries instead of finding a dead entry.
    fn release_failed(&self, key: &K, cell: &Arc<OnceCell<V>>) {
        let mut slots = self.slots.lock().expect("cache lock poisoned");
        if let Some(slot) = slots.get(key) {
            if Arc::ptr_eq(&slot.cell, cell) && !slot.cell.initialized() {
                slots.remove(key);
            }
        }
    }
}
