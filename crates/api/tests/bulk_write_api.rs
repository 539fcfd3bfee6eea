//! Bulk ingest through the HTTP layer against stores that fail or stall
//! part-way.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{
    body_json, build_app_with_config, build_app_with_store, get, post_json_authed, shade_json,
    test_config,
};
use serde_json::json;
use skintone_api::config::ServerConfig;
use skintone_core::shade::{ShadeFields, ShadeRecord};
use skintone_core::store::{MemoryShadeStore, ShadeField, ShadeStore, StoreError, TimedStore};

/// Delegates to a memory store but fails the N-th batch commit.
struct FlakyStore {
    inner: MemoryShadeStore,
    commits: AtomicUsize,
    fail_on: usize,
}

#[async_trait]
impl ShadeStore for FlakyStore {
    async fn get(&self, shade_id: &str) -> Result<Option<ShadeRecord>, StoreError> {
        self.inner.get(shade_id).await
    }
    async fn query_by_field(
        &self,
        field: ShadeField,
        value: &str,
    ) -> Result<Vec<ShadeRecord>, StoreError> {
        self.inner.query_by_field(field, value).await
    }
    async fn get_all(&self) -> Result<Vec<ShadeRecord>, StoreError> {
        self.inner.get_all().await
    }
    async fn set(&self, record: &ShadeRecord) -> Result<(), StoreError> {
        self.inner.set(record).await
    }
    async fn update(
        &self,
        shade_id: &str,
        fields: &ShadeFields,
    ) -> Result<ShadeRecord, StoreError> {
        self.inner.update(shade_id, fields).await
    }
    async fn delete(&self, shade_id: &str) -> Result<(), StoreError> {
        self.inner.delete(shade_id).await
    }
    async fn commit_batch(&self, records: &[ShadeRecord]) -> Result<(), StoreError> {
        let n = self.commits.fetch_add(1, Ordering::SeqCst) + 1;
        if n == self.fail_on {
            return Err(StoreError::Backend("replica quorum lost".into()));
        }
        self.inner.commit_batch(records).await
    }
}

/// Delegates to a memory store; every batch commit takes `delay`, and the
/// `stall_on`-th commit never finishes.
struct SlowStore {
    inner: MemoryShadeStore,
    commits: AtomicUsize,
    delay: Duration,
    stall_on: Option<usize>,
}

impl SlowStore {
    fn new(delay: Duration, stall_on: Option<usize>) -> Self {
        Self {
            inner: MemoryShadeStore::new(),
            commits: AtomicUsize::new(0),
            delay,
            stall_on,
        }
    }
}

#[async_trait]
impl ShadeStore for SlowStore {
    async fn get(&self, shade_id: &str) -> Result<Option<ShadeRecord>, StoreError> {
        self.inner.get(shade_id).await
    }
    async fn query_by_field(
        &self,
        field: ShadeField,
        value: &str,
    ) -> Result<Vec<ShadeRecord>, StoreError> {
        self.inner.query_by_field(field, value).await
    }
    async fn get_all(&self) -> Result<Vec<ShadeRecord>, StoreError> {
        self.inner.get_all().await
    }
    async fn set(&self, record: &ShadeRecord) -> Result<(), StoreError> {
        self.inner.set(record).await
    }
    async fn update(
        &self,
        shade_id: &str,
        fields: &ShadeFields,
    ) -> Result<ShadeRecord, StoreError> {
        self.inner.update(shade_id, fields).await
    }
    async fn delete(&self, shade_id: &str) -> Result<(), StoreError> {
        self.inner.delete(shade_id).await
    }
    async fn commit_batch(&self, records: &[ShadeRecord]) -> Result<(), StoreError> {
        let n = self.commits.fetch_add(1, Ordering::SeqCst) + 1;
        if Some(n) == self.stall_on {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(self.delay).await;
        self.inner.commit_batch(records).await
    }
}

#[tokio::test]
async fn test_partial_bulk_failure_keeps_earlier_chunks() {
    let store = Arc::new(FlakyStore {
        inner: MemoryShadeStore::new(),
        commits: AtomicUsize::new(0),
        fail_on: 2,
    });
    // Chunks of two: [B0, B1] [B2, B3] [B4].
    let app = build_app_with_store(store.clone(), 2);
    let payload: Vec<_> = (0..5).map(|i| shade_json(&format!("B{i}"), "DEEP")).collect();

    let response = post_json_authed(app.clone(), "/api/shades", json!(payload)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BULK_WRITE_FAILED");
    assert_eq!(json["details"]["failed_chunk"], 2);
    assert_eq!(json["details"]["total_chunks"], 3);
    assert_eq!(json["details"]["committed_records"], 2);
    assert!(!json.to_string().contains("quorum"));

    // First chunk persisted; second and third not.
    assert_eq!(get(app.clone(), "/api/shades/B1").await.status(), StatusCode::OK);
    assert_eq!(get(app.clone(), "/api/shades/B2").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(app, "/api/shades/B4").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.commits.load(Ordering::SeqCst), 2, "third chunk never attempted");
}

#[tokio::test]
async fn test_bulk_ingest_outlasts_the_request_timeout() {
    let store = Arc::new(SlowStore::new(Duration::from_millis(400), None));
    let app = build_app_with_config(
        store.clone(),
        ServerConfig {
            request_timeout_secs: 1,
            bulk_chunk_size: 1,
            ..test_config()
        },
    );
    let payload: Vec<_> = (0..3).map(|i| shade_json(&format!("S{i}"), "TAN")).collect();

    let response = post_json_authed(app, "/api/shades", json!(payload)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["count"], 3);
    assert_eq!(json["chunks"], 3);
    assert_eq!(store.inner.len().await, 3);
}

#[tokio::test]
async fn test_stalled_chunk_reports_progress() {
    let slow = SlowStore::new(Duration::ZERO, Some(2));
    let store = Arc::new(TimedStore::new(slow, Duration::from_millis(100)));
    let app = build_app_with_config(
        store.clone(),
        ServerConfig {
            bulk_chunk_size: 1,
            ..test_config()
        },
    );
    let payload: Vec<_> = (0..3).map(|i| shade_json(&format!("T{i}"), "TAN")).collect();

    let response = post_json_authed(app.clone(), "/api/shades", json!(payload)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BULK_WRITE_FAILED");
    assert_eq!(json["details"]["failed_chunk"], 2);
    assert_eq!(json["details"]["total_chunks"], 3);
    assert_eq!(json["details"]["committed_records"], 1);

    assert_eq!(get(app.clone(), "/api/shades/T0").await.status(), StatusCode::OK);
    assert_eq!(get(app, "/api/shades/T1").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.inner().commits.load(Ordering::SeqCst), 2);
}
