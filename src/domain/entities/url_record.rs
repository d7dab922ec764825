//! Url record entity representing a persisted short key mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted mapping from a short key to its original URL.
///
/// Records are never mutated after creation. They disappear either through an
/// explicit delete or lazily, the first time a resolve observes them expired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub short_key: String,
    pub expire_time: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_key: String,
        expire_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_key,
            expire_time,
        }
    }

    /// Returns true if the record is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_time < now
    }

    /// Returns true if the record has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input data for inserting a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub short_key: String,
    pub expire_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expire_time: DateTime<Utc>) -> UrlRecord {
        UrlRecord::new(
            1,
            "https://example.com".to_string(),
            "abc123".to_string(),
            expire_time,
        )
    }

    #[test]
    fn test_record_in_future_is_live() {
        let record = record(Utc::now() + Duration::days(1));
        assert!(!record.is_expired());
    }

    #[test]
    fn test_record_in_past_is_expired() {
        let record = record(Utc::now() - Duration::seconds(1));
        assert!(record.is_expired());
    }

    #[test]
    fn test_expiry_boundary_is_still_live() {
        let now = Utc::now();
        let record = record(now);
        assert!(!record.is_expired_at(now));
        assert!(record.is_expired_at(now + Duration::milliseconds(1)));
    }

    #[test]
    fn test_record_json_shape() {
        let record = record(Utc::now());
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["original_url"], "https://example.com");
        assert_eq!(value["short_key"], "abc123");
        assert!(value["expire_time"].is_string());
    }
}
