//! Expiring cache entries on top of a [`KeyValueStore`].

use super::traits::{CacheEntry, CacheKey, CacheStatus, KeyValueStore};
use crate::error::{GuideError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Payload + timestamp cache with best-effort semantics.
///
/// Reads never fail: a missing, unreadable or undecodable entry is reported as
/// absent, and undecodable entries are removed. Write failures are returned so
/// the caller can log them, but leave the store consistent.
#[derive(Clone)]
pub struct CacheStore {
    backend: Arc<dyn KeyValueStore>,
}

impl CacheStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Read and decode the entry under `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<CacheEntry<T>> {
        let (raw_payload, raw_timestamp) = match (
            self.backend.get_item(&key.payload),
            self.backend.get_item(&key.timestamp),
        ) {
            (Ok(Some(payload)), Ok(Some(timestamp))) => (payload, timestamp),
            (Ok(_), Ok(_)) => return None,
            (Err(e), _) | (_, Err(e)) => {
                warn!("Error reading cache entry {}: {}", key.payload, e);
                return None;
            }
        };

        let stored_at_millis = match raw_timestamp.trim().parse::<i64>() {
            Ok(ts) => ts,
            Err(e) => {
                warn!("Corrupt cache timestamp {:?}: {}, clearing", raw_timestamp, e);
                self.clear(key);
                return None;
            }
        };

        match serde_json::from_str::<T>(&raw_payload) {
            Ok(payload) => Some(CacheEntry {
                payload,
                stored_at_millis,
            }),
            Err(e) => {
                warn!("Corrupt cache payload {}: {}, clearing", key.payload, e);
                self.clear(key);
                None
            }
        }
    }

    /// Serialize `value` and store it with `stored_at_millis`.
    ///
    /// Overwrites unconditionally. On failure no half-written entry is left
    /// behind.
    pub fn set<T: Serialize>(&self, key: &CacheKey, value: &T, stored_at_millis: i64) -> Result<()> {
        let serialized = serde_json::to_string(value)?;

        let write = self
            .backend
            .set_item(&key.payload, &serialized)
            .and_then(|_| {
                self.backend
                    .set_item(&key.timestamp, &stored_at_millis.to_string())
            });

        if let Err(e) = write {
            self.clear(key);
            return Err(GuideError::CacheWrite {
                key: key.payload.clone(),
                message: e.to_string(),
            });
        }

        debug!(
            "Cached {} ({} bytes) at {}",
            key.payload,
            serialized.len(),
            stored_at_millis
        );
        Ok(())
    }

    /// Remove the payload and its timestamp companion. Idempotent.
    pub fn clear(&self, key: &CacheKey) {
        for storage_key in [&key.payload, &key.timestamp] {
            if let Err(e) = self.backend.remove_item(storage_key) {
                warn!("Failed to remove cache key {}: {}", storage_key, e);
            }
        }
    }

    /// `now - stored_at > max_age`.
    pub fn is_expired(stored_at_millis: i64, max_age_millis: i64, now_millis: i64) -> bool {
        now_millis.saturating_sub(stored_at_millis) > max_age_millis
    }

    /// Age and expiry of the entry under `key`, from its timestamp alone.
    pub fn status(&self, key: &CacheKey, max_age_millis: i64, now_millis: i64) -> CacheStatus {
        let stored_at = self
            .backend
            .get_item(&key.timestamp)
            .ok()
            .flatten()
            .and_then(|raw| raw.trim().parse::<i64>().ok());

        match stored_at {
            Some(stored_at) => {
                let age = now_millis.saturating_sub(stored_at);
                CacheStatus {
                    cached: true,
                    age_millis: Some(age),
                    expired: age > max_age_millis,
                    expires_in_millis: Some(max_age_millis.saturating_sub(age)),
                }
            }
            None => CacheStatus::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use serde_json::{json, Value};

    fn store() -> (Arc<MemoryStore>, CacheStore) {
        let backend = Arc::new(MemoryStore::new());
        (backend.clone(), CacheStore::new(backend))
    }

    #[test]
    fn test_set_then_get() {
        let (_backend, cache) = store();
        let key = CacheKey::default();
        cache.set(&key, &json!({"characters": []}), 1_000).unwrap();

        let entry: CacheEntry<Value> = cache.get(&key).unwrap();
        assert_eq!(entry.payload, json!({"characters": []}));
        assert_eq!(entry.stored_at_millis, 1_000);
    }

    #[test]
    fn test_missing_timestamp_is_absent() {
        let (backend, cache) = store();
        let key = CacheKey::default();
        backend.set_item(&key.payload, "{}").unwrap();
        assert!(cache.get::<Value>(&key).is_none());
    }

    #[test]
    fn test_corrupt_payload_is_removed() {
        let (backend, cache) = store();
        let key = CacheKey::default();
        backend.set_item(&key.payload, "{not json").unwrap();
        backend.set_item(&key.timestamp, "5").unwrap();

        assert!(cache.get::<Value>(&key).is_none());
        assert!(backend.is_empty());
    }

    #[test]
    fn test_corrupt_timestamp_is_removed() {
        let (backend, cache) = store();
        let key = CacheKey::default();
        backend.set_item(&key.payload, "{}").unwrap();
        backend.set_item(&key.timestamp, "yesterday").unwrap();

        assert!(cache.get::<Value>(&key).is_none());
        assert!(backend.is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (backend, cache) = store();
        let key = CacheKey::default();
        cache.set(&key, &json!(1), 10).unwrap();
        cache.clear(&key);
        cache.clear(&key);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_quota_failure_leaves_no_entry() {
        let backend = Arc::new(MemoryStore::with_quota(40));
        let cache = CacheStore::new(backend.clone());
        let key = CacheKey::default();

        let result = cache.set(&key, &json!({"characters": vec!["x"; 20]}), 10);
        assert!(matches!(result, Err(GuideError::CacheWrite { .. })));
        assert!(backend.is_empty());
    }

    #[test]
    fn test_is_expired_boundary() {
        assert!(!CacheStore::is_expired(0, 100, 100));
        assert!(CacheStore::is_expired(0, 100, 101));
    }

    #[test]
    fn test_extreme_timestamps_saturate() {
        assert!(CacheStore::is_expired(i64::MIN, 100, 1_000));
        assert!(!CacheStore::is_expired(i64::MAX, 100, -1_000));

        let (backend, cache) = store();
        let key = CacheKey::default();
        backend.set_item(&key.payload, "{}").unwrap();
        backend.set_item(&key.timestamp, &i64::MIN.to_string()).unwrap();

        let status = cache.status(&key, 100, 1_000);
        assert!(status.expired);
        assert_eq!(status.age_millis, Some(i64::MAX));

        backend.set_item(&key.timestamp, &i64::MAX.to_string()).unwrap();
        let status = cache.status(&key, i64::MAX, -1_000);
        assert!(!status.expired);
        assert_eq!(status.expires_in_millis, Some(i64::MAX));
    }

    #[test]
    fn test_status() {
        let (_backend, cache) = store();
        let key = CacheKey::default();
        assert!(!cache.status(&key, 100, 0).cached);

        cache.set(&key, &json!(1), 1_000).unwrap();
        let fresh = cache.status(&key, 100, 1_050);
        assert!(fresh.cached);
        assert!(!fresh.expired);
        assert_eq!(fresh.age_millis, Some(50));
        assert_eq!(fresh.expires_in_millis, Some(50));

        let expired = cache.status(&key, 100, 1_200);
        assert!(expired.expired);
        assert_eq!(expired.expires_in_millis, Some(-100));
    }
}
