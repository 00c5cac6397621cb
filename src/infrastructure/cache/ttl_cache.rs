//! In-process TTL cache with bounded capacity.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    expires_at: Instant,
    last_used: u64,
}

struct Inner<K, V> {
    map: HashMap<K, Entry<V>>,
    tick: u64,
}

/// Capacity-bounded keyed store with per-entry expiry.
///
/// Every entry expires a fixed TTL after insertion; expiry is checked lazily on
/// access (no background sweep), and an expired entry behaves as absent. When an
/// insertion exceeds capacity, the least-recently-used live entry is evicted,
/// expired entries first.
///
/// The structure is total: no operation fails, and all mutation goes through
/// `get`/`set`/`delete`. Shared freely across tasks; the critical sections are
/// short and never await.
pub struct TtlCache<K, V> {
    ttl: Duration,
    capacity: usize,
    inner: Mutex<Inner<K, V>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache holding at most `capacity` entries, each expiring `ttl`
    /// after insertion.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
            inner: Mutex::new(Inner {
                map: HashMap::new(),
                tick: 0,
            }),
        }
    }

    /// Returns the live value for `key`, or `None` if absent or expired.
    /// Expired entries are removed on the way out.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.lock();
        let now = Instant::now();

        let expired = inner.map.get(key)?.expires_at <= now;
        if expired {
            inner.map.remove(key);
            return None;
        }

        inner.tick += 1;
        let tick = inner.tick;
        let entry = inner.map.get_mut(key)?;
        entry.last_used = tick;
        Some(entry.value.clone())
    }

    /// Inserts `value` under `key`, stamping its expiry now. Evicts the
    /// least-recently-used entry when over capacity.
    pub fn set(&self, key: K, value: V) {
        let mut inner = self.lock();
        inner.tick += 1;
        let tick = inner.tick;
        let expires_at = Instant::now() + self.ttl;

        inner.map.insert(
            key,
            Entry {
                value,
                expires_at,
                last_used: tick,
            },
        );

        if inner.map.len() > self.capacity {
            let now = Instant::now();
            inner.map.retain(|_, e| e.expires_at > now);
        }
        while inner.map.len() > self.capacity {
            let coldest = inner
                .map
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone());
            match coldest {
                Some(k) => inner.map.remove(&k),
                None => break,
            };
        }
    }

    /// Removes `key` if present.
    pub fn delete(&self, key: &K) {
        self.lock().map.remove(key);
    }

    /// Number of entries currently held, expired ones included until touched.
    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // The cache stays usable even if a panic poisoned the mutex: entries are
    // plain values, so the inner state cannot be left logically broken.
    fn lock(&self) -> MutexGuard<'_, Inner<K, V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
