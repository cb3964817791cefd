//! Cached dataset loading.
//!
//! Resolution order for [`DataLoader::load`]:
//! 1. a fresh, valid cache entry
//! 2. the dataset source, validated and written back to the cache
//! 3. the cache entry regardless of age (stale fallback)
//!
//! Only when all three fail does the caller see an error, always
//! [`GuideError::DataUnavailable`] carrying the last failure.

mod validation;

pub use validation::{parse_dataset, parse_dataset_str, validate_structure};

use crate::cache::{CacheStatus, CacheStore, KeyValueStore};
use crate::clock::{Clock, SystemClock};
use crate::config::LoaderConfig;
use crate::error::{GuideError, Result};
use crate::models::Dataset;
use crate::network::{retry_fetch, DynDatasetSource};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a loaded dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    /// Fresh cache hit; no fetch was made.
    Cache,
    /// Fetched from the source and cached.
    Network,
    /// Expired cache entry used because the fetch failed.
    StaleCache,
}

/// A successfully loaded dataset.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub origin: DataOrigin,
    /// Why fresher data could not be obtained, for stale results.
    pub fallback_reason: Option<String>,
}

impl LoadOutcome {
    pub fn is_stale(&self) -> bool {
        self.origin == DataOrigin::StaleCache
    }
}

/// Loads the character dataset through the cache.
pub struct DataLoader {
    config: LoaderConfig,
    cache: CacheStore,
    source: DynDatasetSource,
    clock: Arc<dyn Clock>,
}

impl DataLoader {
    pub fn new(config: LoaderConfig, store: Arc<dyn KeyValueStore>, source: DynDatasetSource) -> Self {
        Self {
            config,
            cache: CacheStore::new(store),
            source,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for timestamps and expiry.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load the dataset: fresh cache, then source, then stale cache.
    pub async fn load(&self) -> Result<LoadOutcome> {
        if let Some(dataset) = self.read_cache(false) {
            debug!("Loading character data from cache");
            return Ok(LoadOutcome {
                dataset,
                origin: DataOrigin::Cache,
                fallback_reason: None,
            });
        }

        info!("Fetching character data from {}", self.source.describe());
        let err = match self.fetch_fresh().await {
            Ok(dataset) => {
                self.write_cache(&dataset);
                info!("Loaded {} characters", dataset.len());
                return Ok(LoadOutcome {
                    dataset,
                    origin: DataOrigin::Network,
                    fallback_reason: None,
                });
            }
            Err(e) => e,
        };

        warn!("Failed to load character data: {}", err);
        match self.read_cache(true) {
            Some(dataset) => {
                warn!("Using expired cached data as fallback");
                Ok(LoadOutcome {
                    dataset,
                    origin: DataOrigin::StaleCache,
                    fallback_reason: Some(err.to_string()),
                })
            }
            None => Err(GuideError::unavailable(err)),
        }
    }

    /// Remove the cached dataset.
    pub fn clear_cache(&self) {
        self.cache.clear(&self.config.cache_key);
        debug!("Cache cleared");
    }

    /// Age and expiry of the cached dataset.
    pub fn cache_status(&self) -> CacheStatus {
        self.cache.status(
            &self.config.cache_key,
            self.config.max_age_millis(),
            self.clock.now_millis(),
        )
    }

    fn read_cache(&self, ignore_expiry: bool) -> Option<Dataset> {
        let key = &self.config.cache_key;
        let entry = self.cache.get::<Value>(key)?;

        if !ignore_expiry && entry.is_expired(self.config.max_age_millis(), self.clock.now_millis()) {
            debug!("Cache expired, will fetch fresh data");
            return None;
        }

        match parse_dataset(entry.payload) {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                warn!("Invalid cached data structure ({}), clearing cache", e);
                self.cache.clear(key);
                None
            }
        }
    }

    async fn fetch_fresh(&self) -> Result<Dataset> {
        let (body, stats) = retry_fetch(&self.config.retry, || self.source.fetch()).await;
        if stats.attempts > 1 {
            debug!("Fetch took {} attempts", stats.attempts);
        }
        parse_dataset_str(&body?)
    }

    fn write_cache(&self, dataset: &Dataset) {
        let now = self.clock.now_millis();
        if let Err(e) = self.cache.set(&self.config.cache_key, dataset, now) {
            warn!("Failed to cache data, continuing without cache: {}", e);
        }
    }
}
