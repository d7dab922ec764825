//! Serialized form of a cached record.

use super::service::{CacheError, CacheResult};
use crate::domain::entities::UrlRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// JSON document stored in the cache under a record's short key.
///
/// Carries the store id so that a lazily expired entry found in the cache can
/// still be deleted from the store by identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub id: i64,
    pub original_url: String,
    pub short_key: String,
    pub expire_time: DateTime<Utc>,
}

impl CacheEntry {
    /// Serializes to the JSON stored in the cache.
    pub fn encode(&self) -> CacheResult<String> {
        serde_json::to_string(self).map_err(|e| CacheError::Serialization(e.to_string()))
    }

    /// Parses a cached JSON payload.
    pub fn decode(raw: &str) -> CacheResult<Self> {
        serde_json::from_str(raw).map_err(|e| CacheError::Serialization(e.to_string()))
    }

    /// TTL to use when caching this entry at `now`.
    ///
    /// The record's remaining lifetime bounds `cap`. Returns `None` when the
    /// record has no lifetime left and should not be cached at all.
    pub fn ttl_at(&self, cap: Duration, now: DateTime<Utc>) -> Option<Duration> {
        let remaining = (self.expire_time - now).to_std().ok()?;
        let ttl = remaining.min(cap);
        (!ttl.is_zero()).then_some(ttl)
    }
}

impl From<&UrlRecord> for CacheEntry {
    fn from(record: &UrlRecord) -> Self {
        Self {
            id: record.id,
            original_url: record.original_url.clone(),
            short_key: record.short_key.clone(),
            expire_time: record.expire_time,
        }
    }
}

impl From<CacheEntry> for UrlRecord {
    fn from(entry: CacheEntry) -> Self {
        UrlRecord::new(
            entry.id,
            entry.original_url,
            entry.short_key,
            entry.expire_time,
        )
    }
}
