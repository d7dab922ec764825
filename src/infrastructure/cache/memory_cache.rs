//! In-process cache with per-entry expiry.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

/// Every this many writes, `set` sweeps out all expired entries.
const SWEEP_INTERVAL: usize = 256;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Cache backed by a sharded concurrent map.
///
/// Expired entries are dropped when they are next read, and swept in bulk
/// every few hundred writes so keys that are never read again do not
/// accumulate. Used when no Redis is configured and in tests, where its
/// contents can be inspected directly.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
    writes: AtomicUsize,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let purged = before.saturating_sub(self.entries.len());
        if purged > 0 {
            debug!(purged, "Memory cache swept expired entries");
        }
        purged
    }

    /// Returns true if a live entry exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(Instant::now()))
    }

    /// Returns the remaining TTL of a live entry.
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.expires_at - now)
    }

    /// Number of stored entries, including not yet evicted expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();

        let stale = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        // The read guard must be released before removing from the same shard.
        if stale {
            self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        debug!(key, ttl_ms = ttl.as_millis() as u64, "Memory cache SET");

        if (self.writes.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_INTERVAL == 0 {
            self.purge_expired();
        }
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> CacheResult<()> {
        for key in keys {
            self.entries.remove(key);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
