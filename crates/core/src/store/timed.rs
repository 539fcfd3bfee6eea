//! Per-call timeout decorator for any [`ShadeStore`].

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use super::{ShadeField, ShadeStore, StoreError};
use crate::shade::{ShadeFields, ShadeRecord};

/// Wraps a store so that every call is bounded by `limit`.
///
/// An expired call yields [`StoreError::Timeout`]. The underlying operation
/// may still complete at the backend; callers must treat a timeout on a
/// write as "outcome unknown".
pub struct TimedStore<S> {
    inner: S,
    limit: Duration,
}

impl<S: ShadeStore> TimedStore<S> {
    pub fn new(inner: S, limit: Duration) -> Self {
        Self { inner, limit }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, StoreError>> + Send,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.limit, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    limit_ms = self.limit.as_millis() as u64,
                    "Store call timed out"
                );
                Err(StoreError::Timeout {
                    operation,
                    after_ms: self.limit.as_millis() as u64,
                })
            }
        }
    }
}

#[async_trait]
impl<S: ShadeStore> ShadeStore for TimedStore<S> {
    async fn get(&self, shade_id: &str) -> Result<Option<ShadeRecord>, StoreError> {
        self.bounded("get", self.inner.get(shade_id)).await
    }

    async fn query_by_field(
        &self,
        field: ShadeField,
        value: &str,
    ) -> Result<Vec<ShadeRecord>, StoreError> {
        self.bounded("query", self.inner.query_by_field(field, value)).await
    }

    async fn get_all(&self) -> Result<Vec<ShadeRecord>, StoreError> {
        self.bounded("get_all", self.inner.get_all()).await
    }

    async fn set(&self, record: &ShadeRecord) -> Result<(), StoreError> {
        self.bounded("set", self.inner.set(record)).await
    }

    async fn update(
        &self,
        shade_id: &str,
        fields: &ShadeFields,
    ) -> Result<ShadeRecord, StoreError> {
        self.bounded("update", self.inner.update(shade_id, fields)).await
    }

    async fn delete(&self, shade_id: &str) -> Result<(), StoreError> {
        self.bounded("delete", self.inner.delete(shade_id)).await
    }

    async fn commit_batch(&self, records: &[ShadeRecord]) -> Result<(), StoreError> {
        self.bounded("commit_batch", self.inner.commit_batch(records)).await
    }
}
