//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Redis cache implementation for fast short key lookups.
///
/// Uses `ConnectionManager` for automatic reconnection and connection reuse.
/// Errors are returned to the caller, which logs them and treats them as a miss.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis client: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {e}")))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {e}")))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "url:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        conn.get::<_, Option<String>>(&redis_key)
            .await
            .map_err(|e| CacheError::Operation(format!("GET {redis_key}: {e}")))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(&redis_key, value, ttl_seconds)
            .await
            .map_err(|e| CacheError::Operation(format!("SET {redis_key}: {e}")))?;

        debug!(key, ttl_seconds, "Cache SET");
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> CacheResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let redis_keys: Vec<String> = keys.iter().map(|k| self.build_key(k)).collect();
        let mut conn = self.client.clone();

        let deleted = conn
            .del::<_, i64>(&redis_keys)
            .await
            .map_err(|e| CacheError::Operation(format!("DEL {}: {e}", redis_keys.join(" "))))?;

        debug!(requested = keys.len(), deleted, "Cache DEL");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        match conn.ping::<()>().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Redis health check failed");
                false
            }
        }
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
