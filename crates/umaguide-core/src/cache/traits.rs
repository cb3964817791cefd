//! Key/value backend trait and cache types.

use crate::config::CacheDefaults;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Generic persistent key/value substrate.
///
/// String keys and string values, like the browser storage the site uses.
/// All operations are synchronous to match rusqlite's API.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// The pair of storage keys that make up one logical cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheKey {
    /// Key holding the serialized payload.
    pub payload: String,
    /// Key holding the epoch-millisecond write time.
    pub timestamp: String,
}

impl CacheKey {
    pub fn new(payload: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            timestamp: timestamp.into(),
        }
    }
}

impl Default for CacheKey {
    fn default() -> Self {
        Self::new(CacheDefaults::PAYLOAD_KEY, CacheDefaults::TIMESTAMP_KEY)
    }
}

/// A decoded cache entry with its write time.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub payload: T,
    pub stored_at_millis: i64,
}

impl<T> CacheEntry<T> {
    /// Age of the entry relative to `now_millis`, saturating on absurd
    /// timestamps.
    pub fn age_millis(&self, now_millis: i64) -> i64 {
        now_millis.saturating_sub(self.stored_at_millis)
    }

    pub fn is_expired(&self, max_age_millis: i64, now_millis: i64) -> bool {
        self.age_millis(now_millis) > max_age_millis
    }
}

/// Snapshot of the cache state, as shown by the site's status indicator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_millis: Option<i64>,
    #[serde(default)]
    pub expired: bool,
    /// Negative once the entry has expired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in_millis: Option<i64>,
}
