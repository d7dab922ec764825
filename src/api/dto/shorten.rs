//! DTOs for the shortening endpoint.

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::application::services::ShortenedUrl;

/// Compiled regex for custom short key validation.
static CUSTOM_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]{6}$").unwrap());

/// Request to shorten a single URL.
///
/// A missing `url` decodes to an empty string so that it is reported as
/// "URL not given" rather than as an undecodable payload.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub url: String,

    /// Optional caller-chosen short key (6 alphanumeric characters).
    /// An empty string is treated as absent.
    #[serde(default, alias = "custom_key", deserialize_with = "empty_as_none")]
    #[validate(regex(path = "*CUSTOM_KEY_REGEX"))]
    pub custom_short_key: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|key| !key.is_empty()))
}

/// Response for a created short key.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: String,
    /// RFC 3339 timestamp (UTC, second precision).
    pub expire_time: String,
}

impl ShortenResponse {
    pub fn format_expire_time(expire_time: DateTime<Utc>) -> String {
        expire_time.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl From<ShortenedUrl> for ShortenResponse {
    fn from(shortened: ShortenedUrl) -> Self {
        Self {
            expire_time: Self::format_expire_time(shortened.record.expire_time),
            original_url: shortened.record.original_url,
            short_url: shortened.short_url,
        }
    }
}
