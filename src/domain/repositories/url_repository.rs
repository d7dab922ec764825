//! Repository trait for short key records.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The short key is already held by another row.
    #[error("short key already exists")]
    UniqueViolation,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Number of stored records, split by expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordCounts {
    pub total: i64,
    pub expired: i64,
}

/// Durable key to URL store.
///
/// The store owns the uniqueness constraint on `short_key`. Callers react to
/// [`StoreError::UniqueViolation`] on insert instead of relying on an
/// existence check beforehand, since check-then-insert is racy.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record and returns it with its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if the short key is taken.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, StoreError>;

    /// Returns true if any row (expired or not) holds `short_key`.
    async fn exists_by_key(&self, short_key: &str) -> Result<bool, StoreError>;

    /// Finds a record by short key, regardless of expiry.
    async fn find_by_key(&self, short_key: &str) -> Result<Option<UrlRecord>, StoreError>;

    /// Deletes a record by id.
    ///
    /// Returns `Ok(false)` if no row had that id.
    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Deletes a record by short key. Used by administrative tooling.
    async fn delete_by_key(&self, short_key: &str) -> Result<bool, StoreError>;

    /// Counts all records and those already past their expiry.
    async fn counts(&self) -> Result<RecordCounts, StoreError>;

    /// Checks that the store is reachable.
    async fn health_check(&self) -> bool;
}
