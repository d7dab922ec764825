//! PostgreSQL implementation of the url repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::{RecordCounts, StoreError, UrlRepository};
use crate::utils::db_error::map_store_error;

/// Row shape shared by every query returning a record.
#[derive(Debug, sqlx::FromRow)]
struct UrlRow {
    id: i64,
    original_url: String,
    short_key: String,
    expire_time: DateTime<Utc>,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(row.id, row.original_url, row.short_key, row.expire_time)
    }
}

/// PostgreSQL repository for short key records.
///
/// Relies on the `urls_short_key_key` unique constraint to reject duplicate
/// keys; a violation is reported as [`StoreError::UniqueViolation`].
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, StoreError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (original_url, short_key, expire_time)
            VALUES ($1, $2, $3)
            RETURNING id, original_url, short_key, expire_time
            "#,
        )
        .bind(&new_record.original_url)
        .bind(&new_record.short_key)
        .bind(new_record.expire_time)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_store_error)?;

        Ok(row.into())
    }

    async fn exists_by_key(&self, short_key: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM urls WHERE short_key = $1)",
        )
        .bind(short_key)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn find_by_key(&self, short_key: &str) -> Result<Option<UrlRecord>, StoreError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, short_key, expire_time
            FROM urls
            WHERE short_key = $1
            LIMIT 1
            "#,
        )
        .bind(short_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM urls WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_key(&self, short_key: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_key = $1")
            .bind(short_key)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn counts(&self) -> Result<RecordCounts, StoreError> {
        let (total, expired) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE expire_time < NOW()) AS expired
            FROM urls
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(RecordCounts { total, expired })
    }

    async fn health_check(&self) -> bool {
        match sqlx::query("SELECT 1").execute(self.pool.as_ref()).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                false
            }
        }
    }
}
