//! Short key lifecycle: creation, resolution and lazy expiry.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::domain::task_coordinator::TaskCoordinator;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheEntry, CacheService};
use crate::utils::key_generator::{
    derive_key, derive_salted_key, is_valid_key, random_salt, validate_custom_key,
};
use crate::utils::url_validator::{UrlValidationError, validate_url};

/// Tunables for the link lifecycle.
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// Public base URL that short keys are appended to.
    pub base_url: String,
    /// Days until a new record expires, rounded down to midnight UTC.
    pub retention_days: u32,
    /// Upper bound on how long an entry may live in the cache.
    pub cache_ttl: Duration,
    /// Salted re-derivations allowed after the first key collides.
    pub max_key_retries: u32,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            retention_days: 8,
            cache_ttl: Duration::from_secs(24 * 60 * 60),
            max_key_retries: 5,
        }
    }
}

/// A freshly created record together with its public short URL.
#[derive(Debug, Clone)]
pub struct ShortenedUrl {
    pub record: UrlRecord,
    pub short_url: String,
}

/// Orchestrates key derivation, the record store and the cache.
///
/// - **Create**: validate, derive (or accept a custom) key, insert with
///   collision retry, then populate the cache in the background.
/// - **Resolve**: cache first, store on miss, and treat a missing or expired
///   record as not found while deleting it from both store and cache in the
///   background.
///
/// The store's unique constraint is the only uniqueness guarantee; the custom
/// key availability check is advisory.
pub struct LinkService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    tasks: TaskCoordinator,
    settings: LinkSettings,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        tasks: TaskCoordinator,
        settings: LinkSettings,
    ) -> Self {
        Self {
            repository,
            cache,
            tasks,
            settings,
        }
    }

    /// Creates a short key for `original_url`.
    ///
    /// Without a custom key, repeated calls for the same URL derive the same
    /// first candidate. A collision on that candidate triggers up to
    /// `max_key_retries` salted re-derivations.
    ///
    /// The cache write is dispatched in the background and not awaited.
    ///
    /// # Errors
    ///
    /// - [`AppError::MissingUrl`] / [`AppError::InvalidUrl`] for a bad URL
    /// - [`AppError::InvalidCustomKey`] for a malformed custom key
    /// - [`AppError::KeyUnavailable`] if the custom key is taken
    /// - [`AppError::KeyGenerationExhausted`] if every candidate collided
    /// - [`AppError::Persistence`] on other store failures
    pub async fn shorten(
        &self,
        original_url: &str,
        custom_key: Option<&str>,
    ) -> Result<ShortenedUrl, AppError> {
        validate_url(original_url).map_err(|e| match e {
            UrlValidationError::Empty => AppError::MissingUrl,
            other => {
                debug!(reason = %other, "Rejected original URL");
                AppError::InvalidUrl
            }
        })?;

        if let Some(key) = custom_key {
            validate_custom_key(key)?;

            if self.repository.exists_by_key(key).await? {
                return Err(AppError::KeyUnavailable);
            }
        }

        let short_key = derive_key(original_url, custom_key)?;
        let expire_time = self.expire_time_from(Utc::now());

        let record = self
            .persist(original_url, short_key, expire_time, custom_key.is_some())
            .await?;

        info!(
            short_key = %record.short_key,
            expire_time = %record.expire_time,
            custom = custom_key.is_some(),
            "Short key created"
        );

        self.schedule_cache_populate(&record);

        Ok(ShortenedUrl {
            short_url: self.short_url(&record.short_key),
            record,
        })
    }

    /// Resolves `short_key` to its live record.
    ///
    /// A record that is absent or past its expiry is reported as not found,
    /// and deletes from the store (by id, when known) and the cache are
    /// scheduled without waiting for them.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidShortKey`] for a malformed key; nothing is looked up
    /// - [`AppError::ShortKeyNotFound`] for a missing or expired record
    /// - [`AppError::Persistence`] if the store lookup fails
    pub async fn resolve(&self, short_key: &str) -> Result<UrlRecord, AppError> {
        if !is_valid_key(short_key) {
            return Err(AppError::InvalidShortKey);
        }

        let record = match self.lookup_cache(short_key).await {
            Some(record) => Some(record),
            None => {
                let record = self.repository.find_by_key(short_key).await?;
                if let Some(record) = record.as_ref().filter(|r| !r.is_expired()) {
                    self.schedule_cache_populate(record);
                }
                record
            }
        };

        match record {
            Some(record) if !record.is_expired_at(Utc::now()) => Ok(record),
            other => {
                self.schedule_purge(short_key, other.map(|r| r.id));
                Err(AppError::ShortKeyNotFound)
            }
        }
    }

    /// Deletes `short_key` from the store and the cache right away.
    ///
    /// Returns false if the store held no such key. Cache failures are logged.
    pub async fn delete(&self, short_key: &str) -> Result<bool, AppError> {
        if !is_valid_key(short_key) {
            return Err(AppError::InvalidShortKey);
        }

        let deleted = self.repository.delete_by_key(short_key).await?;

        if let Err(e) = self.cache.delete(&[short_key.to_string()]).await {
            warn!(short_key, error = %e, "Failed to delete cache entry");
        }

        Ok(deleted)
    }

    /// Constructs the full short URL for a key.
    pub fn short_url(&self, short_key: &str) -> String {
        format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            short_key
        )
    }

    /// Expiry for a record created at `now`: `retention_days` later, at
    /// midnight UTC of that day.
    pub fn expire_time_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let target = now + chrono::Duration::days(i64::from(self.settings.retention_days));
        target.date_naive().and_time(NaiveTime::MIN).and_utc()
    }

    /// The coordinator running this service's background tasks.
    pub fn tasks(&self) -> &TaskCoordinator {
        &self.tasks
    }

    /// Inserts the record, re-deriving a salted key after each collision.
    async fn persist(
        &self,
        original_url: &str,
        mut short_key: String,
        expire_time: DateTime<Utc>,
        custom: bool,
    ) -> Result<UrlRecord, AppError> {
        let max_attempts = self.settings.max_key_retries + 1;
        let mut attempt = 1;

        loop {
            let new_record = NewUrlRecord {
                original_url: original_url.to_string(),
                short_key: short_key.clone(),
                expire_time,
            };

            match self.repository.insert(new_record).await {
                Ok(record) => return Ok(record),
                Err(StoreError::UniqueViolation) if custom => {
                    return Err(AppError::KeyUnavailable);
                }
                Err(StoreError::UniqueViolation) if attempt < max_attempts => {
                    metrics::counter!("linkvault_key_collisions_total").increment(1);
                    debug!(short_key = %short_key, attempt, "Short key collision, retrying with salt");

                    short_key = derive_salted_key(original_url, &random_salt());
                    attempt += 1;
                }
                Err(StoreError::UniqueViolation) => {
                    warn!(attempts = attempt, "Short key generation exhausted");
                    return Err(AppError::KeyGenerationExhausted { attempts: attempt });
                }
                Err(e) => return Err(AppError::Persistence(e)),
            }
        }
    }

    /// Reads and decodes a cache entry. Errors and bad payloads count as a miss.
    async fn lookup_cache(&self, short_key: &str) -> Option<UrlRecord> {
        let raw = match self.cache.get(short_key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                metrics::counter!("linkvault_cache_misses_total").increment(1);
                debug!(short_key, "Cache MISS");
                return None;
            }
            Err(e) => {
                metrics::counter!("linkvault_cache_misses_total").increment(1);
                warn!(short_key, error = %e, "Cache read failed, falling back to store");
                return None;
            }
        };

        match CacheEntry::decode(&raw) {
            Ok(entry) if entry.short_key == short_key => {
                metrics::counter!("linkvault_cache_hits_total").increment(1);
                debug!(short_key, "Cache HIT");
                Some(entry.into())
            }
            Ok(entry) => {
                metrics::counter!("linkvault_cache_misses_total").increment(1);
                warn!(short_key, cached_key = %entry.short_key, "Cache entry key mismatch");
                None
            }
            Err(e) => {
                metrics::counter!("linkvault_cache_misses_total").increment(1);
                warn!(short_key, error = %e, "Undecodable cache entry");
                None
            }
        }
    }

    fn schedule_cache_populate(&self, record: &UrlRecord) {
        let entry = CacheEntry::from(record);
        let Some(ttl) = entry.ttl_at(self.settings.cache_ttl, Utc::now()) else {
            return;
        };

        let cache = self.cache.clone();
        self.tasks.spawn("cache_populate", async move {
            let raw = entry.encode()?;
            cache.set(&entry.short_key, &raw, ttl).await?;
            anyhow::Ok(())
        });
    }

    fn schedule_purge(&self, short_key: &str, id: Option<i64>) {
        if let Some(id) = id {
            metrics::counter!("linkvault_expired_purges_total").increment(1);
            info!(short_key, id, "Purging expired short key");

            let repository = self.repository.clone();
            self.tasks.spawn("store_delete", async move {
                repository.delete_by_id(id).await?;
                anyhow::Ok(())
            });
        }

        let cache = self.cache.clone();
        let keys = vec![short_key.to_string()];
        self.tasks.spawn("cache_delete", async move {
            cache.delete(&keys).await?;
            anyhow::Ok(())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::cache::{CacheError, CacheResult, MemoryCache, NullCache};
    use async_trait::async_trait;
    use chrono::{Duration as ChronoDuration, TimeZone, Timelike};
    use mockall::Sequence;

    struct FailingCache;

    #[async_trait]
    impl CacheService for FailingCache {
        async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
            Err(CacheError::Connection("down".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
            Err(CacheError::Connection("down".to_string()))
        }

        async fn delete(&self, _keys: &[String]) -> CacheResult<()> {
            Err(CacheError::Connection("down".to_string()))
        }

        async fn health_check(&self) -> bool {
            false
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    fn tasks() -> TaskCoordinator {
        TaskCoordinator::new(Duration::from_secs(5))
    }

    fn service(repo: MockUrlRepository, cache: Arc<dyn CacheService>) -> LinkService {
        LinkService::new(Arc::new(repo), cache, tasks(), LinkSettings::default())
    }

    fn stored(id: i64, new: NewUrlRecord) -> UrlRecord {
        UrlRecord::new(id, new.original_url, new.short_key, new.expire_time)
    }

    fn live_record(key: &str) -> UrlRecord {
        UrlRecord::new(
            42,
            "https://www.google.com/".to_string(),
            key.to_string(),
            Utc::now() + ChronoDuration::days(1),
        )
    }

    fn expired_record(key: &str) -> UrlRecord {
        UrlRecord::new(
            43,
            "https://www.google.com/".to_string(),
            key.to_string(),
            Utc::now() - ChronoDuration::seconds(1),
        )
    }

    #[tokio::test]
    async fn test_shorten_uses_deterministic_key() {
        let mut repo = MockUrlRepository::new();
        repo.expect_exists_by_key().times(0);
        repo.expect_insert()
            .withf(|new| new.short_key == "0LQfXx" && new.original_url == "https://www.google.com/")
            .times(1)
            .returning(|new| Ok(stored(1, new)));

        let service = service(repo, Arc::new(NullCache::new()));
        let result = service.shorten("https://www.google.com/", None).await.unwrap();

        assert_eq!(result.record.short_key, "0LQfXx");
        assert_eq!(result.short_url, "http://localhost:8080/0LQfXx");
        service.tasks().wait_idle().await;
    }

    #[tokio::test]
    async fn test_shorten_populates_cache_in_background() {
        let mut repo = MockUrlRepository::new();
        repo.expect_insert().returning(|new| Ok(stored(9, new)));

        let cache = Arc::new(MemoryCache::new());
        let service = service(repo, cache.clone());

        let result = service.shorten("https://example.com", None).await.unwrap();
        service.tasks().wait_idle().await;

        let raw = cache.get(&result.record.short_key).await.unwrap().unwrap();
        let entry = CacheEntry::decode(&raw).unwrap();
        assert_eq!(entry.id, 9);
        assert_eq!(entry.original_url, "https://example.com");

        let ttl = cache.ttl(&result.record.short_key).unwrap();
        assert!(ttl <= LinkSettings::default().cache_ttl);
    }

    #[tokio::test]
    async fn test_shorten_missing_url() {
        let repo = MockUrlRepository::new();
        let service = service(repo, Arc::new(NullCache::new()));

        let result = service.shorten("", None).await;
        assert!(matches!(result, Err(AppError::MissingUrl)));
    }

    #[tokio::test]
    async fn test_shorten_invalid_url_never_touches_store() {
        let mut repo = MockUrlRepository::new();
        repo.expect_insert().times(0);
        repo.expect_exists_by_key().times(0);

        let service = service(repo, Arc::new(NullCache::new()));

        let result = service.shorten("asdasdffsadklj", None).await;
        assert!(matches!(result, Err(AppError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_shorten_invalid_custom_key_persists_nothing() {
        let mut repo = MockUrlRepository::new();
        repo.expect_insert().times(0);
        repo.expect_exists_by_key().times(0);

        let service = service(repo, Arc::new(NullCache::new()));

        for key in ["abc", "abc-12", "1234567", "12#456"] {
            let result = service.shorten("https://example.com", Some(key)).await;
            assert!(
                matches!(result, Err(AppError::InvalidCustomKey)),
                "custom key {key:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_shorten_custom_key_taken() {
        let mut repo = MockUrlRepository::new();
        repo.expect_exists_by_key()
            .withf(|key| key == "taken1")
            .times(1)
            .returning(|_| Ok(true));
        repo.expect_insert().times(0);

        let service = service(repo, Arc::new(NullCache::new()));

        let result = service.shorten("https://example.com", Some("taken1")).await;
        assert!(matches!(result, Err(AppError::KeyUnavailable)));
    }

    #[tokio::test]
    async fn test_shorten_custom_key_accepted() {
        let mut repo = MockUrlRepository::new();
        repo.expect_exists_by_key().returning(|_| Ok(false));
        repo.expect_insert()
            .withf(|new| new.short_key == "MyKey1")
            .times(1)
            .returning(|new| Ok(stored(5, new)));

        let service = service(repo, Arc::new(NullCache::new()));

        let result = service
            .shorten("https://example.com", Some("MyKey1"))
            .await
            .unwrap();
        assert_eq!(result.record.short_key, "MyKey1");
        assert_eq!(result.short_url, "http://localhost:8080/MyKey1");
    }

    #[tokio::test]
    async fn test_shorten_custom_key_lost_race_is_not_retried() {
        let mut repo = MockUrlRepository::new();
        repo.expect_exists_by_key().returning(|_| Ok(false));
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(StoreError::UniqueViolation));

        let service = service(repo, Arc::new(NullCache::new()));

        let result = service.shorten("https://example.com", Some("MyKey1")).await;
        assert!(matches!(result, Err(AppError::KeyUnavailable)));
    }

    #[tokio::test]
    async fn test_shorten_retries_with_salted_key_after_collision() {
        let mut repo = MockUrlRepository::new();
        let mut seq = Sequence::new();

        repo.expect_insert()
            .withf(|new| new.short_key == "0LQfXx")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(StoreError::UniqueViolation));
        repo.expect_insert()
            .withf(|new| new.short_key != "0LQfXx" && is_valid_key(&new.short_key))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new| Ok(stored(2, new)));

        let service = service(repo, Arc::new(NullCache::new()));

        let result = service.shorten("https://www.google.com/", None).await.unwrap();
        assert_ne!(result.record.short_key, "0LQfXx");
        assert_eq!(result.record.original_url, "https://www.google.com/");
    }

    #[tokio::test]
    async fn test_shorten_gives_up_after_max_retries() {
        let mut repo = MockUrlRepository::new();
        repo.expect_insert()
            .times(6)
            .returning(|_| Err(StoreError::UniqueViolation));

        let service = service(repo, Arc::new(NullCache::new()));

        let result = service.shorten("https://www.google.com/", None).await;
        assert!(matches!(
            result,
            Err(AppError::KeyGenerationExhausted { attempts: 6 })
        ));
    }

    #[tokio::test]
    async fn test_shorten_store_failure_is_persistence_error() {
        let mut repo = MockUrlRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));

        let service = service(repo, Arc::new(NullCache::new()));

        let result = service.shorten("https://www.google.com/", None).await;
        assert!(matches!(result, Err(AppError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_shorten_survives_cache_failure() {
        let mut repo = MockUrlRepository::new();
        repo.expect_insert().returning(|new| Ok(stored(1, new)));

        let service = service(repo, Arc::new(FailingCache));

        let result = service.shorten("https://www.google.com/", None).await;
        assert!(result.is_ok());
        service.tasks().wait_idle().await;
    }

    #[tokio::test]
    async fn test_resolve_rejects_malformed_key_before_lookup() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_key().times(0);

        let service = service(repo, Arc::new(NullCache::new()));

        for key in ["1234567", "123#56", "", "abc"] {
            assert!(matches!(
                service.resolve(key).await,
                Err(AppError::InvalidShortKey)
            ));
        }
    }

    #[tokio::test]
    async fn test_resolve_cache_hit_skips_store() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_key().times(0);

        let cache = Arc::new(MemoryCache::new());
        let record = live_record("abc123");
        cache
            .set(
                "abc123",
                &CacheEntry::from(&record).encode().unwrap(),
                Duration::from_secs(60),
            )
            .await
            .unwrap();

        let service = service(repo, cache);
        let resolved = service.resolve("abc123").await.unwrap();

        assert_eq!(resolved, record);
    }

    #[tokio::test]
    async fn test_resolve_cache_miss_reads_store_and_repopulates() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_key()
            .withf(|key| key == "abc123")
            .times(1)
            .returning(|key| Ok(Some(live_record(key))));

        let cache = Arc::new(MemoryCache::new());
        let service = service(repo, cache.clone());

        let resolved = service.resolve("abc123").await.unwrap();
        assert_eq!(resolved.original_url, "https://www.google.com/");

        service.tasks().wait_idle().await;
        assert!(cache.contains("abc123"));
    }

    #[tokio::test]
    async fn test_resolve_cache_error_falls_back_to_store() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_key()
            .times(1)
            .returning(|key| Ok(Some(live_record(key))));

        let service = service(repo, Arc::new(FailingCache));

        let resolved = service.resolve("abc123").await.unwrap();
        assert_eq!(resolved.short_key, "abc123");
        service.tasks().wait_idle().await;
    }

    #[tokio::test]
    async fn test_resolve_corrupt_cache_entry_falls_back_to_store() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_key()
            .times(1)
            .returning(|key| Ok(Some(live_record(key))));

        let cache = Arc::new(MemoryCache::new());
        cache
            .set("abc123", "{not json", Duration::from_secs(60))
            .await
            .unwrap();

        let service = service(repo, cache);
        assert!(service.resolve("abc123").await.is_ok());
        service.tasks().wait_idle().await;
    }

    #[tokio::test]
    async fn test_resolve_unknown_key_is_not_found() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_key().times(1).returning(|_| Ok(None));
        repo.expect_delete_by_id().times(0);

        let service = service(repo, Arc::new(NullCache::new()));

        let result = service.resolve("zzzzzz").await;
        assert!(matches!(result, Err(AppError::ShortKeyNotFound)));
        service.tasks().wait_idle().await;
    }

    #[tokio::test]
    async fn test_resolve_expired_record_is_purged() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_key()
            .times(1)
            .returning(|key| Ok(Some(expired_record(key))));
        repo.expect_delete_by_id()
            .withf(|id| *id == 43)
            .times(1)
            .returning(|_| Ok(true));

        let cache = Arc::new(MemoryCache::new());
        let service = service(repo, cache.clone());

        let result = service.resolve("old123").await;
        assert!(matches!(result, Err(AppError::ShortKeyNotFound)));

        service.tasks().wait_idle().await;
        assert!(!cache.contains("old123"));
    }

    #[tokio::test]
    async fn test_resolve_expired_cache_entry_is_purged_by_id() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_key().times(0);
        repo.expect_delete_by_id()
            .withf(|id| *id == 43)
            .times(1)
            .returning(|_| Ok(true));

        let cache = Arc::new(MemoryCache::new());
        cache
            .set(
                "old123",
                &CacheEntry::from(&expired_record("old123")).encode().unwrap(),
                Duration::from_secs(60),
            )
            .await
            .unwrap();

        let service = service(repo, cache.clone());

        let result = service.resolve("old123").await;
        assert!(matches!(result, Err(AppError::ShortKeyNotFound)));

        service.tasks().wait_idle().await;
        assert!(!cache.contains("old123"));
    }

    #[tokio::test]
    async fn test_resolve_purge_failure_is_swallowed() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_key()
            .returning(|key| Ok(Some(expired_record(key))));
        repo.expect_delete_by_id()
            .times(1)
            .returning(|_| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));

        let service = service(repo, Arc::new(FailingCache));

        let result = service.resolve("old123").await;
        assert!(matches!(result, Err(AppError::ShortKeyNotFound)));

        service.tasks().wait_idle().await;
        assert_eq!(service.tasks().outstanding(), 0);
    }

    #[tokio::test]
    async fn test_resolve_store_failure_does_not_purge() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_key()
            .times(1)
            .returning(|_| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));
        repo.expect_delete_by_id().times(0);

        let service = service(repo, Arc::new(NullCache::new()));

        let result = service.resolve("abc123").await;
        assert!(matches!(result, Err(AppError::Persistence(_))));
        assert_eq!(service.tasks().outstanding(), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_store_row_and_cache_entry() {
        let mut repo = MockUrlRepository::new();
        repo.expect_delete_by_key()
            .withf(|key| key == "abc123")
            .times(1)
            .returning(|_| Ok(true));

        let cache = Arc::new(MemoryCache::new());
        cache
            .set("abc123", "v", Duration::from_secs(60))
            .await
            .unwrap();

        let service = service(repo, cache.clone());

        assert!(service.delete("abc123").await.unwrap());
        assert!(!cache.contains("abc123"));
    }

    #[test]
    fn test_expire_time_is_normalized_to_midnight() {
        let service = service(MockUrlRepository::new(), Arc::new(NullCache::new()));
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 15, 42, 7).unwrap();

        let expire = service.expire_time_from(now);

        assert_eq!(expire, Utc.with_ymd_and_hms(2026, 3, 18, 0, 0, 0).unwrap());
        assert_eq!(expire.hour(), 0);
        assert!(expire - now > ChronoDuration::days(7));
        assert!(expire - now <= ChronoDuration::days(8));
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let settings = LinkSettings {
            base_url: "https://s.example.com/".to_string(),
            ..LinkSettings::default()
        };
        let service = LinkService::new(
            Arc::new(MockUrlRepository::new()),
            Arc::new(NullCache::new()),
            tasks(),
            settings,
        );

        assert_eq!(service.short_url("abc123"), "https://s.example.com/abc123");
    }
}
