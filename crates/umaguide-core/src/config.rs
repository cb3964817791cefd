//! Centralized configuration for the guide data core.
//!
//! Constant holders mirror the defaults of the published site; [`LoaderConfig`]
//! is the runtime value handed to the loader.

use crate::cache::CacheKey;
use crate::network::RetryConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Cache-related defaults.
pub struct CacheDefaults;

impl CacheDefaults {
    /// Storage key of the serialized dataset.
    pub const PAYLOAD_KEY: &'static str = "uma_musume_characters";
    /// Storage key of the epoch-millisecond write timestamp.
    pub const TIMESTAMP_KEY: &'static str = "uma_musume_cache_timestamp";
    /// Cached data expires after 24 hours.
    pub const MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);
    pub const DB_DIR_NAME: &'static str = "umaguide";
    pub const DB_FILE_NAME: &'static str = "cache.sqlite";

    /// `<platform data dir>/umaguide/cache.sqlite`, if the platform has one.
    pub fn default_db_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(Self::DB_DIR_NAME).join(Self::DB_FILE_NAME))
    }
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    /// Location of the dataset inside a checkout of the site.
    pub const DATA_PATH: &'static str = "assets/data/characters.json";
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
    pub const USER_AGENT: &'static str = "UmaGuide/0.3";
}

/// Selection limits.
pub struct SelectionConfig;

impl SelectionConfig {
    /// Maximum number of characters compared side by side.
    pub const MAX_SELECTED: usize = 4;
}

/// Stat normalisation used by the overall rating.
pub struct RatingConfig;

impl RatingConfig {
    /// Five stats at a nominal maximum of 100 each.
    pub const MAX_TOTAL_STATS: i64 = 500;
}

/// Runtime configuration for [`crate::DataLoader`].
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Where the dataset comes from: an http(s) URL or a local path.
    pub data_location: String,
    /// Companion storage keys for the cached dataset.
    pub cache_key: CacheKey,
    /// Entries older than this are only used as a stale fallback.
    pub max_age: Duration,
    /// Per-request timeout for HTTP sources.
    pub request_timeout: Duration,
    /// Retry policy for retryable fetch failures.
    pub retry: RetryConfig,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_location: NetworkConfig::DATA_PATH.to_string(),
            cache_key: CacheKey::default(),
            max_age: CacheDefaults::MAX_AGE,
            request_timeout: NetworkConfig::REQUEST_TIMEOUT,
            retry: RetryConfig::new().with_max_attempts(1),
        }
    }
}

impl LoaderConfig {
    /// Create a config pointing at `data_location`.
    pub fn new(data_location: impl Into<String>) -> Self {
        Self {
            data_location: data_location.into(),
            ..Self::default()
        }
    }

    /// Set the cache expiry window.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Set the companion storage keys.
    pub fn with_cache_key(mut self, cache_key: CacheKey) -> Self {
        self.cache_key = cache_key;
        self
    }

    /// Set the HTTP request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Expiry window in epoch milliseconds.
    pub fn max_age_millis(&self) -> i64 {
        i64::try_from(self.max_age.as_millis()).unwrap_or(i64::MAX)
    }
}
