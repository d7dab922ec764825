#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use linkvault::application::services::LinkSettings;
use linkvault::domain::entities::{NewUrlRecord, UrlRecord};
use linkvault::domain::repositories::{RecordCounts, StoreError, UrlRepository};
use linkvault::domain::task_coordinator::TaskCoordinator;
use linkvault::infrastructure::cache::MemoryCache;
use linkvault::state::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory record store enforcing short key uniqueness.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    records: Mutex<HashMap<String, UrlRecord>>,
    next_id: AtomicI64,
    unhealthy: AtomicBool,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record directly, bypassing the uniqueness check.
    pub fn seed(&self, short_key: &str, original_url: &str, expire_time: DateTime<Utc>) -> UrlRecord {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = UrlRecord::new(id, original_url.to_string(), short_key.to_string(), expire_time);
        self.records
            .lock()
            .unwrap()
            .insert(short_key.to_string(), record.clone());
        record
    }

    pub fn seed_expired(&self, short_key: &str, original_url: &str) -> UrlRecord {
        self.seed(short_key, original_url, Utc::now() - ChronoDuration::hours(1))
    }

    pub fn get(&self, short_key: &str) -> Option<UrlRecord> {
        self.records.lock().unwrap().get(short_key).cloned()
    }

    pub fn delete_row(&self, short_key: &str) {
        self.records.lock().unwrap().remove(short_key);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.unhealthy.store(!healthy, Ordering::SeqCst);
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, StoreError> {
        let mut records = self.records.lock().unwrap();

        if records.contains_key(&new_record.short_key) {
            return Err(StoreError::UniqueViolation);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = UrlRecord::new(
            id,
            new_record.original_url,
            new_record.short_key,
            new_record.expire_time,
        );
        records.insert(record.short_key.clone(), record.clone());

        Ok(record)
    }

    async fn exists_by_key(&self, short_key: &str) -> Result<bool, StoreError> {
        Ok(self.records.lock().unwrap().contains_key(short_key))
    }

    async fn find_by_key(&self, short_key: &str) -> Result<Option<UrlRecord>, StoreError> {
        Ok(self.get(short_key))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|_, record| record.id != id);
        Ok(records.len() < before)
    }

    async fn delete_by_key(&self, short_key: &str) -> Result<bool, StoreError> {
        Ok(self.records.lock().unwrap().remove(short_key).is_some())
    }

    async fn counts(&self) -> Result<RecordCounts, StoreError> {
        let records = self.records.lock().unwrap();
        let now = Utc::now();
        let expired = records.values().filter(|r| r.is_expired_at(now)).count();

        Ok(RecordCounts {
            total: records.len() as i64,
            expired: expired as i64,
        })
    }

    async fn health_check(&self) -> bool {
        !self.unhealthy.load(Ordering::SeqCst)
    }
}

/// Handles into the stores behind a test [`AppState`].
pub struct TestContext {
    pub state: AppState,
    pub repository: Arc<InMemoryUrlRepository>,
    pub cache: Arc<MemoryCache>,
}

/// State over an in-memory store and cache, with responses held until
/// background tasks have drained.
pub fn create_test_context() -> TestContext {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let cache = Arc::new(MemoryCache::new());
    let tasks = TaskCoordinator::new(Duration::from_secs(5)).with_wait_mode(true);

    let state = AppState::new(
        repository.clone(),
        cache.clone(),
        tasks,
        LinkSettings::default(),
    );

    TestContext {
        state,
        repository,
        cache,
    }
}
