//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// These never reach an HTTP client: callers log them and fall back to the
/// record store.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),

    #[error("Cache operation error: {0}")]
    Operation(String),

    #[error("Cache serialization error: {0}")]
    Serialization(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value cache with per-entry TTL holding serialized records.
///
/// The cache is never authoritative. Any entry may be missing or evicted at
/// any time, and callers treat an error exactly like a miss.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process TTL map
/// - [`crate::infrastructure::cache::NullCache`] - No-op, always misses
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the serialized value for `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on cache miss
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key` for `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Removes all of `keys`. Missing keys are not an error.
    async fn delete(&self, keys: &[String]) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reports.
    fn backend(&self) -> &'static str;
}
