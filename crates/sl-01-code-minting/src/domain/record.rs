//! Records owned by the authoritative store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of cache keys for the short-code -> destination mapping
pub const URL_CACHE_PREFIX: &str = "url:";

/// An accepted short code and the URL it points to
///
/// `short_code` is unique across the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortCodeRecord {
    pub short_code: String,
    pub destination_url: String,
    pub created_at: DateTime<Utc>,
    /// Who asked for the code (client address in the web layer)
    pub origin_identifier: String,
}

impl ShortCodeRecord {
    pub fn new(
        short_code: impl Into<String>,
        destination_url: impl Into<String>,
        origin_identifier: impl Into<String>,
    ) -> Self {
        Self {
            short_code: short_code.into(),
            destination_url: destination_url.into(),
            created_at: Utc::now(),
            origin_identifier: origin_identifier.into(),
        }
    }
}

/// Cache key for a short code
pub fn url_cache_key(short_code: &str) -> String {
    format!("{}{}", URL_CACHE_PREFIX, short_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key() {
        assert_eq!(url_cache_key("aZ3kP9q"), "url:aZ3kP9q");
    }

    #[test]
    fn test_record_serde() {
        let record = ShortCodeRecord::new("abc1234", "https://example.com/a", "10.0.0.1");
        let json = serde_json::to_string(&record).unwrap();
        let restored: ShortCodeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
    }
}
