//! Bounded-lifetime memoization for upstream lookups.
//!
//! Weather, trip, and station responses are expensive to re-fetch, so callers
//! memoize them here for a few minutes. Eviction is lazy: an expired entry
//! stays in the map until a read touches it or `cleanup` sweeps it. `len`
//! therefore counts not-yet-evicted expired entries — that is a deliberate,
//! tested property of the cache, not an oversight.
//!
//! Each cache instance owns its entries outright; there is no cross-instance
//! coordination and no self-scheduled sweeping. A periodic job may call
//! `cleanup` if it cares about memory between reads.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default entry lifetime in minutes.
const DEFAULT_TTL_MINUTES: u64 = 5;

/// Source of the current time in epoch milliseconds.
///
/// Production code uses [`SystemClock`]; tests inject a manual clock so
/// expiry can be exercised without sleeping.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A stored value and the epoch-ms instant it was written.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    timestamp_ms: u64,
}

/// Generic expiring key/value store.
///
/// `insert` stamps the current time and overwrites unconditionally; `get`
/// returns `None` for entries older than the TTL, deleting them as a side
/// effect. There is no key-level locking — the last writer for a key wins.
#[derive(Debug)]
pub struct TtlCache<T, C: Clock = SystemClock> {
    entries: HashMap<String, CacheEntry<T>>,
    ttl_ms: u64,
    clock: C,
}

impl<T> TtlCache<T> {
    /// Create a cache with the default 5-minute TTL.
    pub fn new() -> Self {
        Self::with_ttl_minutes(DEFAULT_TTL_MINUTES)
    }

    /// Create a cache whose entries expire after `ttl_minutes`.
    pub fn with_ttl_minutes(ttl_minutes: u64) -> Self {
        Self::with_clock(ttl_minutes, SystemClock)
    }
}

impl<T> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clock> TtlCache<T, C> {
    /// Create a cache with an explicit clock (used by tests).
    pub fn with_clock(ttl_minutes: u64, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_ms: ttl_minutes * 60 * 1000,
            clock,
        }
    }

    /// Store a value, overwriting any existing entry for the key.
    pub fn insert(&mut self, key: impl Into<String>, data: T) {
        let timestamp_ms = self.clock.now_ms();
        self.entries.insert(key.into(), CacheEntry { data, timestamp_ms });
    }

    /// Fetch a live value. An expired entry is deleted and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<&T> {
        let now = self.clock.now_ms();
        let expired = match self.entries.get(key) {
            None => return None,
            Some(entry) => now.saturating_sub(entry.timestamp_ms) > self.ttl_ms,
        };

        if expired {
            self.entries.remove(key);
            return None;
        }

        self.entries.get(key).map(|entry| &entry.data)
    }

    /// Whether a live value exists for the key. Expired entries report
    /// `false` and are evicted, exactly as in [`get`](Self::get).
    pub fn contains(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove an entry. Returns whether one was present (expired or not).
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Raw entry count, including expired entries that no read has evicted yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evict every expired entry and return how many were removed.
    pub fn cleanup(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_sub(entry.timestamp_ms) <= self.ttl_ms);
        before - self.entries.len()
    }
}
