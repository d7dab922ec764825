//! Caching layer for fast redirect lookups.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - In-process TTL map for single-node setups and tests
//! - [`NullCache`] - No-op implementation for disabled caching
//!
//! [`CacheEntry`] is the JSON document stored under each short key.

mod entry;
mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use entry::CacheEntry;
pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
