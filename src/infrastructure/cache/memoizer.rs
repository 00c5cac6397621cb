//! Memoizing single-flight wrapper over [`TtlCache`].

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::broadcast;

use crate::error::AppError;
use crate::infrastructure::cache::ttl_cache::TtlCache;

type FlightResult<V> = Result<V, AppError>;

struct Shared<K, V> {
    cache: TtlCache<K, V>,
    pending: Mutex<HashMap<K, broadcast::Sender<FlightResult<V>>>>,
}

impl<K: Eq + Hash, V> Shared<K, V> {
    fn pending(&self) -> MutexGuard<'_, HashMap<K, broadcast::Sender<FlightResult<V>>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Coalesces concurrent lookups of the same key into one load.
///
/// On a cache miss the first caller becomes the flight leader and starts the
/// load; every caller that arrives for the same key before the flight settles
/// subscribes to its result instead of loading again. A successful value is
/// cached for the TTL, a failed load is delivered to every waiter and caches
/// nothing, so the next caller retries.
///
/// The load runs on a detached task: a caller giving up (client disconnect,
/// timeout) never aborts a flight other callers are waiting on.
///
/// Cloning is cheap and shares the underlying cache.
pub struct Memoizer<K, V> {
    shared: Arc<Shared<K, V>>,
}

impl<K, V> Clone for Memoizer<K, V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K, V> Memoizer<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                cache: TtlCache::new(capacity, ttl),
                pending: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Returns the cached value for `key`, or loads it via `load`, sharing the
    /// load with every concurrent caller of the same key.
    ///
    /// # Errors
    ///
    /// Propagates the error produced by `load` to every caller waiting on the
    /// same flight.
    pub async fn resolve<F, Fut>(&self, key: K, load: F) -> Result<V, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, AppError>> + Send + 'static,
    {
        if let Some(hit) = self.shared.cache.get(&key) {
            return Ok(hit);
        }

        let (mut rx, lead_tx) = {
            let mut pending = self.shared.pending();
            // A flight may have settled while we raced for the lock.
            if let Some(hit) = self.shared.cache.get(&key) {
                return Ok(hit);
            }
            match pending.get(&key) {
                Some(tx) => (tx.subscribe(), None),
                None => {
                    let (tx, rx) = broadcast::channel(1);
                    pending.insert(key.clone(), tx.clone());
                    (rx, Some(tx))
                }
            }
        };

        if let Some(tx) = lead_tx {
            let shared = Arc::clone(&self.shared);
            let fut = load();
            tokio::spawn(async move {
                let result = fut.await;
                if let Ok(value) = &result {
                    shared.cache.set(key.clone(), value.clone());
                }
                shared.pending().remove(&key);
                let _ = tx.send(result);
            });
        }

        match rx.recv().await {
            Ok(result) => result,
            // The flight task drops the sender only after sending, so this arm
            // is unreachable unless the runtime is shutting down.
            Err(_) => Err(AppError::store(
                "Lookup interrupted",
                serde_json::json!({}),
            )),
        }
    }

    /// Drops the cached value for `key`, forcing the next resolve to load.
    /// An in-progress flight for the key is not interrupted.
    pub fn remove(&self, key: &K) {
        self.shared.cache.delete(key);
    }
}
