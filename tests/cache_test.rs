//! Tests for [`MokaStore`] — TTL semantics and concurrent access through
//! the [`CacheStore`] capability.

use std::sync::Arc;
use std::time::Duration;

use hermod::{CacheConfig, CacheStore, GatewayResponse, MokaStore};

fn response(code: u16, body: &str) -> GatewayResponse {
    GatewayResponse::new(code, body)
}

#[tokio::test]
async fn miss_returns_none() {
    let store = MokaStore::default();
    assert!(store.get(42).await.is_none());
}

#[tokio::test]
async fn insert_then_get() {
    let store = MokaStore::default();
    store.insert(1, response(200, "{}")).await;

    let got = store.get(1).await.expect("entry should be present");
    assert_eq!(got.http_code, 200);
    assert_eq!(got.body, "{}");
}

#[tokio::test]
async fn last_writer_wins() {
    let store = MokaStore::default();
    store.insert(1, response(200, "first")).await;
    store.insert(1, response(404, "second")).await;

    let got = store.get(1).await.unwrap();
    assert_eq!(got.http_code, 404);
    assert_eq!(got.body, "second");
}

#[tokio::test]
async fn entries_expire_after_ttl() {
    let store = MokaStore::new(&CacheConfig::new().ttl(Duration::from_millis(100)));
    store.insert(1, response(200, "{}")).await;

    assert!(store.get(1).await.is_some());
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(store.get(1).await.is_none());
}

#[tokio::test]
async fn error_statuses_are_storable() {
    // The generic path caches non-200 results; the store must not care.
    let store = MokaStore::default();
    store.insert(7, response(404, "missing")).await;
    store.insert(8, response(400, r#"{"error":"Wrong action"}"#)).await;

    assert_eq!(store.get(7).await.unwrap().http_code, 404);
    assert_eq!(store.get(8).await.unwrap().http_code, 400);
}

#[tokio::test]
async fn concurrent_readers_and_writers() {
    let store: Arc<dyn CacheStore> = Arc::new(MokaStore::default());
    let mut handles = Vec::new();

    for i in 0..10u64 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.insert(i, response(200, &format!("body-{i}"))).await;
        }));
    }
    for i in 0..10u64 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            // May or may not see the entry yet; must not panic.
            let _ = store.get(i).await;
        }));
    }

    for h in handles {
        h.await.expect("task panicked");
    }

    for i in 0..10u64 {
        let got = store.get(i).await.expect("entry should be present");
        assert_eq!(got.body, format!("body-{i}"));
    }
}
