//! Expiring key/value cache for upstream responses.
//!
//! Owned by the provider clients, never by the analysis core. Time comes
//! from an injectable [`Clock`] so expiry is testable, and the map is
//! capacity-bound with oldest-expiry-first eviction.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Default entry lifetime, matching the upstream refresh cadence
pub const DEFAULT_TTL: Duration = Duration::from_secs(8 * 60 * 60);

/// Default entry capacity per cache
pub const DEFAULT_CAPACITY: usize = 256;

/// Time source for cache expiry
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time source
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// TTL cache with capacity-bound eviction
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
    clock: Arc<dyn Clock>,
    capacity: usize,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache with the default TTL and capacity
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), DEFAULT_TTL, DEFAULT_CAPACITY)
    }

    /// Create a cache with an explicit clock, TTL and capacity
    pub fn with_clock(clock: Arc<dyn Clock>, default_ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            capacity,
            default_ttl,
        }
    }

    /// Get a live entry; expired entries are dropped on access
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let now = self.clock.now();

        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert with the default TTL
    pub async fn insert(&self, key: &str, value: V) {
        self.insert_with_ttl(key, value, self.default_ttl).await;
    }

    /// Insert with an explicit TTL, evicting the entry closest to expiry
    /// when the cache is full
    pub async fn insert_with_ttl(&self, key: &str, value: V, ttl: Duration) {
        let mut entries = self.entries.lock().await;
        let now = self.clock.now();

        if !entries.contains_key(key) && entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.expires_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: now + ttl,
            },
        );
    }

    /// Return the cached value for `key`, or run `fetcher` and cache its
    /// result with the default TTL. A failed fetch caches nothing.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetcher: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        let value = fetcher().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }

    /// Drop all entries
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
