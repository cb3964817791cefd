//! Integration tests for cached dataset loading.
//!
//! These drive [`DataLoader`] through a stub source, a manual clock and both
//! store implementations.

mod common;

use common::{dataset_json, http_error, StubSource, HOUR_MILLIS, START_MILLIS};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use umaguide_core::cache::{KeyValueStore, MemoryStore, SqliteStore};
use umaguide_core::{
    CacheDefaults, DataLoader, DataOrigin, GuideError, LoaderConfig, ManualClock, RetryConfig,
};

struct Harness {
    loader: DataLoader,
    store: Arc<MemoryStore>,
    source: Arc<StubSource>,
    clock: Arc<ManualClock>,
}

fn harness_with(config: LoaderConfig, store: Arc<MemoryStore>) -> Harness {
    let source = Arc::new(StubSource::new());
    let clock = Arc::new(ManualClock::new(START_MILLIS));
    let loader = DataLoader::new(config, store.clone(), source.clone()).with_clock(clock.clone());
    Harness {
        loader,
        store,
        source,
        clock,
    }
}

fn harness() -> Harness {
    harness_with(LoaderConfig::default(), Arc::new(MemoryStore::new()))
}

#[tokio::test]
async fn test_second_load_is_served_from_cache() {
    let h = harness();
    h.source.push_ok(dataset_json());

    let first = h.loader.load().await.unwrap();
    assert_eq!(first.origin, DataOrigin::Network);
    assert_eq!(first.dataset.len(), 5);
    assert!(h.store.contains_key(CacheDefaults::PAYLOAD_KEY));
    assert!(h.store.contains_key(CacheDefaults::TIMESTAMP_KEY));

    h.clock.advance(HOUR_MILLIS);
    let second = h.loader.load().await.unwrap();
    assert_eq!(second.origin, DataOrigin::Cache);
    assert_eq!(second.dataset, first.dataset);
    assert_eq!(h.source.calls(), 1);
}

#[tokio::test]
async fn test_entry_expires_strictly_after_max_age() {
    let h = harness();
    h.source.push_ok(dataset_json());
    h.loader.load().await.unwrap();

    // Exactly 24h old is still fresh.
    h.clock.advance(24 * HOUR_MILLIS);
    assert_eq!(h.loader.load().await.unwrap().origin, DataOrigin::Cache);

    h.clock.advance(1);
    h.source.push_ok(dataset_json());
    assert_eq!(h.loader.load().await.unwrap().origin, DataOrigin::Network);
    assert_eq!(h.source.calls(), 2);

    // The refetch reset the timestamp.
    let status = h.loader.cache_status();
    assert!(status.cached);
    assert!(!status.expired);
    assert_eq!(status.age_millis, Some(0));
}

#[tokio::test]
async fn test_stale_cache_used_when_fetch_fails() {
    let h = harness();
    h.source.push_ok(dataset_json());
    let fresh = h.loader.load().await.unwrap();

    h.clock.advance(48 * HOUR_MILLIS);
    h.source.push_err(http_error(503));
    let stale = h.loader.load().await.unwrap();

    assert_eq!(stale.origin, DataOrigin::StaleCache);
    assert!(stale.is_stale());
    assert_eq!(stale.dataset, fresh.dataset);
    assert!(stale.fallback_reason.unwrap().contains("503"));
    assert!(h.loader.cache_status().expired);
}

#[tokio::test]
async fn test_invalid_payload_falls_back_to_stale_cache() {
    let h = harness();
    h.source.push_ok(dataset_json());
    h.loader.load().await.unwrap();

    h.clock.advance(25 * HOUR_MILLIS);
    h.source.push_ok(r#"{"characters": [{"id": "x"}]}"#);
    let outcome = h.loader.load().await.unwrap();
    assert_eq!(outcome.origin, DataOrigin::StaleCache);
    assert_eq!(outcome.dataset.len(), 5);
}

#[tokio::test]
async fn test_no_cache_and_failed_fetch_is_unavailable() {
    let h = harness();
    h.source.push_err(http_error(404));

    let err = h.loader.load().await.unwrap_err();
    match &err {
        GuideError::DataUnavailable { cause } => {
            assert!(matches!(**cause, GuideError::Network { status: Some(404), .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_payload_without_cache_is_unavailable() {
    let h = harness();
    h.source.push_ok(r#"{"data": []}"#);

    let err = h.loader.load().await.unwrap_err();
    assert!(matches!(err, GuideError::DataUnavailable { .. }));
    assert!(matches!(err.root_cause(), GuideError::Validation { .. }));
    assert!(!h.store.contains_key(CacheDefaults::PAYLOAD_KEY));
}

#[tokio::test]
async fn test_corrupt_cache_entry_is_cleared() {
    let h = harness();
    h.store
        .set_item(CacheDefaults::PAYLOAD_KEY, "{not json")
        .unwrap();
    h.store
        .set_item(CacheDefaults::TIMESTAMP_KEY, &START_MILLIS.to_string())
        .unwrap();

    assert!(h.loader.load().await.is_err());
    assert!(!h.store.contains_key(CacheDefaults::PAYLOAD_KEY));
    assert!(!h.store.contains_key(CacheDefaults::TIMESTAMP_KEY));
}

#[tokio::test]
async fn test_extreme_cache_timestamp_counts_as_expired() {
    let h = harness();
    h.store
        .set_item(CacheDefaults::PAYLOAD_KEY, &dataset_json())
        .unwrap();
    h.store
        .set_item(CacheDefaults::TIMESTAMP_KEY, &i64::MIN.to_string())
        .unwrap();

    assert!(h.loader.cache_status().expired);

    // Never served as fresh: the source is consulted first.
    h.source.push_err(http_error(500));
    let outcome = h.loader.load().await.unwrap();
    assert_eq!(outcome.origin, DataOrigin::StaleCache);
    assert_eq!(h.source.calls(), 1);

    h.source.push_ok(dataset_json());
    assert_eq!(h.loader.load().await.unwrap().origin, DataOrigin::Network);
    assert!(!h.loader.cache_status().expired);
}

#[tokio::test]
async fn test_structurally_invalid_cache_is_replaced() {
    let h = harness();
    h.store
        .set_item(CacheDefaults::PAYLOAD_KEY, r#"{"characters": 5}"#)
        .unwrap();
    h.store
        .set_item(CacheDefaults::TIMESTAMP_KEY, &START_MILLIS.to_string())
        .unwrap();
    h.source.push_ok(dataset_json());

    let outcome = h.loader.load().await.unwrap();
    assert_eq!(outcome.origin, DataOrigin::Network);
    assert_eq!(h.source.calls(), 1);
    assert_eq!(h.loader.load().await.unwrap().origin, DataOrigin::Cache);
}

#[tokio::test]
async fn test_cache_write_failure_is_not_fatal() {
    let h = harness_with(LoaderConfig::default(), Arc::new(MemoryStore::with_quota(64)));
    h.source.push_ok(dataset_json());
    h.source.push_ok(dataset_json());

    let outcome = h.loader.load().await.unwrap();
    assert_eq!(outcome.origin, DataOrigin::Network);
    assert!(!h.loader.cache_status().cached);

    // Nothing was cached, so the next load fetches again.
    assert_eq!(h.loader.load().await.unwrap().origin, DataOrigin::Network);
    assert_eq!(h.source.calls(), 2);
}

#[tokio::test]
async fn test_clear_cache_forces_refetch() {
    let h = harness();
    h.source.push_ok(dataset_json());
    h.loader.load().await.unwrap();

    h.loader.clear_cache();
    h.loader.clear_cache();
    let status = h.loader.cache_status();
    assert!(!status.cached);
    assert_eq!(status.age_millis, None);

    h.source.push_ok(dataset_json());
    assert_eq!(h.loader.load().await.unwrap().origin, DataOrigin::Network);
}

#[tokio::test]
async fn test_custom_cache_keys_and_max_age() {
    let config = LoaderConfig::default()
        .with_cache_key(umaguide_core::cache::CacheKey::new("chars", "chars_ts"))
        .with_max_age(Duration::from_secs(60));
    let h = harness_with(config, Arc::new(MemoryStore::new()));
    h.source.push_ok(dataset_json());
    h.loader.load().await.unwrap();

    assert!(h.store.contains_key("chars"));
    assert!(h.store.contains_key("chars_ts"));
    assert!(!h.store.contains_key(CacheDefaults::PAYLOAD_KEY));

    h.clock.advance(61_000);
    assert!(h.loader.cache_status().expired);
}

#[tokio::test(start_paused = true)]
async fn test_retryable_failures_are_retried() {
    let config = LoaderConfig::default().with_retry(
        RetryConfig::new()
            .with_max_attempts(3)
            .with_base_delay(Duration::from_millis(100))
            .with_jitter(false),
    );
    let h = harness_with(config, Arc::new(MemoryStore::new()));
    h.source.push_err(http_error(503));
    h.source.push_ok(dataset_json());

    assert_eq!(h.loader.load().await.unwrap().origin, DataOrigin::Network);
    assert_eq!(h.source.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_client_errors_are_not_retried() {
    let config = LoaderConfig::default().with_retry(RetryConfig::new().with_max_attempts(3));
    let h = harness_with(config, Arc::new(MemoryStore::new()));
    h.source.push_err(http_error(404));

    assert!(h.loader.load().await.is_err());
    assert_eq!(h.source.calls(), 1);
}

#[tokio::test]
async fn test_sqlite_cache_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cache.sqlite");
    let clock = Arc::new(ManualClock::new(START_MILLIS));

    let first_source = Arc::new(StubSource::serving(dataset_json()));
    {
        let store = Arc::new(SqliteStore::new(&db_path).unwrap());
        let loader = DataLoader::new(LoaderConfig::default(), store, first_source.clone())
            .with_clock(clock.clone());
        assert_eq!(loader.load().await.unwrap().origin, DataOrigin::Network);
    }

    let second_source = Arc::new(StubSource::new());
    let store = Arc::new(SqliteStore::new(&db_path).unwrap());
    let loader =
        DataLoader::new(LoaderConfig::default(), store, second_source.clone()).with_clock(clock);
    let outcome = loader.load().await.unwrap();

    assert_eq!(outcome.origin, DataOrigin::Cache);
    assert_eq!(outcome.dataset.metadata.unwrap().total_characters, Some(5));
    assert_eq!(second_source.calls(), 0);
}
