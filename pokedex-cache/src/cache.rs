//! In-memory TTL cache keyed by request URL.
//!
//! # Expiry model
//!
//! `get` never looks at an entry's age. A single background task sleeps for
//! one TTL, then removes every entry whose age has reached the TTL. An entry
//! inserted just after a sweep therefore survives until the following one,
//! so the worst-case lifetime is just under `2 × ttl`.
//!
//! # Locking
//!
//! One `RwLock` guards the map. Lookups share it; inserts and sweeps hold it
//! exclusively for the map mutation only.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use pokedex_core::constants::DEFAULT_CACHE_INTERVAL_MS;

/// Shortest reap period; a zero TTL would otherwise spin the reaper.
const MIN_REAP_PERIOD: Duration = Duration::from_millis(1);

/// Cache entry.
#[derive(Clone)]
struct CacheEntry {
    value: Bytes,
    created_at: Instant,
}

/// Cache configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry TTL and reap period, in milliseconds
    pub interval_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_CACHE_INTERVAL_MS,
        }
    }
}

impl CacheConfig {
    /// Creates a configuration with the given interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Returns the interval as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// State shared between handles and the reaper task.
struct Shared {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    reaped: AtomicU64,
}

impl Shared {
    fn reap(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| e.created_at.elapsed() < self.ttl);
        let removed = before - entries.len();
        drop(entries);

        self.reaped.fetch_add(removed as u64, Ordering::Relaxed);
        removed
    }
}

/// Owns the reaper's lifetime. Dropped with the last cache handle.
struct Reaper {
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Reaper {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Time-expiring cache of raw response bodies.
///
/// Cloning yields another handle to the same cache. The background reaper
/// runs until [`TtlCache::shutdown`] is awaited or every handle is dropped.
///
/// # Example
///
/// ```rust,ignore
/// let cache = TtlCache::new(Duration::from_secs(5));
/// cache.add("https://pokeapi.co/api/v2/location-area/", body);
/// if let Some(bytes) = cache.get("https://pokeapi.co/api/v2/location-area/") {
///     // decode bytes
/// }
/// cache.shutdown().await;
/// ```
#[derive(Clone)]
pub struct TtlCache {
    shared: Arc<Shared>,
    reaper: Arc<Reaper>,
}

impl TtlCache {
    /// Creates a cache and starts its reaper.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(ttl: Duration) -> Self {
        let shared = Arc::new(Shared {
            entries: RwLock::new(HashMap::new()),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            reaped: AtomicU64::new(0),
        });

        let cancel = CancellationToken::new();
        let task = tokio::spawn(reap_loop(Arc::clone(&shared), cancel.clone()));
        debug!(ttl = ?ttl, "Started cache reaper");

        Self {
            shared,
            reaper: Arc::new(Reaper {
                cancel,
                task: Mutex::new(Some(task)),
            }),
        }
    }

    /// Creates a cache from configuration.
    pub fn with_config(config: &CacheConfig) -> Self {
        Self::new(config.interval())
    }

    /// Inserts or overwrites the entry for `key`, stamped with the current time.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let key = key.into();
        let entry = CacheEntry {
            value: value.into(),
            created_at: Instant::now(),
        };
        trace!(key = %key, bytes = entry.value.len(), "Cache add");
        self.shared.entries.write().insert(key, entry);
    }

    /// Returns the cached value for `key`, if present.
    ///
    /// Does not check the entry's age; stale entries stay visible until the
    /// next sweep removes them.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let value = self.shared.entries.read().get(key).map(|e| e.value.clone());

        let counter = if value.is_some() {
            &self.shared.hits
        } else {
            &self.shared.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    /// Runs one sweep now and returns how many entries it removed.
    pub fn reap_expired(&self) -> usize {
        self.shared.reap()
    }

    /// Returns the TTL shared by all entries.
    pub fn ttl(&self) -> Duration {
        self.shared.ttl
    }

    /// Returns the number of cached entries, including stale ones not yet reaped.
    pub fn len(&self) -> usize {
        self.shared.entries.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.shared.entries.read().is_empty()
    }

    /// Returns true while the background reaper is running.
    pub fn is_reaping(&self) -> bool {
        self.reaper
            .task
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.shared.hits.load(Ordering::Relaxed),
            misses: self.shared.misses.load(Ordering::Relaxed),
            reaped: self.shared.reaped.load(Ordering::Relaxed),
        }
    }

    /// Stops the reaper and waits for it to exit.
    ///
    /// Entries remain readable afterwards but are no longer expired.
    /// Calling this more than once, or from several handles, is harmless.
    pub async fn shutdown(&self) {
        self.reaper.cancel.cancel();
        let task = self.reaper.task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                debug!(error = %e, "Cache reaper ended abnormally");
            }
        }
    }
}

impl std::fmt::Debug for TtlCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.shared.ttl)
            .field("entries", &self.len())
            .finish()
    }
}

async fn reap_loop(shared: Arc<Shared>, cancel: CancellationToken) {
    let period = shared.ttl.max(MIN_REAP_PERIOD);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Cache reaper shutting down");
                return;
            }
            _ = tokio::time::sleep(period) => {}
        }

        let removed = shared.reap();
        if removed > 0 {
            debug!(removed, "Reaped expired cache entries");
        }
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries currently held (including stale ones awaiting a sweep)
    pub entries: usize,
    /// Lookups that found an entry
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Entries removed by sweeps so far
    pub reaped: u64,
}

impl CacheStats {
    /// Fraction of lookups that were hits, in `[0, 1]`.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
