//! In-process [`ShadeStore`] backed by an ordered map.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ShadeField, ShadeStore, StoreError};
use crate::shade::{ShadeFields, ShadeRecord};

/// Map-backed store. Batches are applied under a single write lock, so they
/// are atomic with respect to every other caller.
#[derive(Debug, Default)]
pub struct MemoryShadeStore {
    docs: RwLock<BTreeMap<String, ShadeRecord>>,
    writes: AtomicUsize,
}

impl MemoryShadeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful mutating calls (`set`, `update`, `delete`,
    /// `commit_batch`) since construction.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl ShadeStore for MemoryShadeStore {
    async fn get(&self, shade_id: &str) -> Result<Option<ShadeRecord>, StoreError> {
        Ok(self.docs.read().await.get(shade_id).cloned())
    }

    async fn query_by_field(
        &self,
        field: ShadeField,
        value: &str,
    ) -> Result<Vec<ShadeRecord>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs
            .values()
            .filter(|record| field.value_of(record) == value)
            .cloned()
            .collect())
    }

    async fn get_all(&self) -> Result<Vec<ShadeRecord>, StoreError> {
        Ok(self.docs.read().await.values().cloned().collect())
    }

    async fn set(&self, record: &ShadeRecord) -> Result<(), StoreError> {
        self.docs
            .write()
            .await
            .insert(record.shade_id.clone(), record.clone());
        self.record_write();
        Ok(())
    }

    async fn update(
        &self,
        shade_id: &str,
        fields: &ShadeFields,
    ) -> Result<ShadeRecord, StoreError> {
        let mut docs = self.docs.write().await;
        let slot = docs
            .get_mut(shade_id)
            .ok_or_else(|| StoreError::Missing(shade_id.to_string()))?;
        *slot = ShadeRecord::from_fields(shade_id, fields.clone());
        let updated = slot.clone();
        drop(docs);

        self.record_write();
        Ok(updated)
    }

    async fn delete(&self, shade_id: &str) -> Result<(), StoreError> {
        self.docs
            .write()
            .await
            .remove(shade_id)
            .ok_or_else(|| StoreError::Missing(shade_id.to_string()))?;
        self.record_write();
        Ok(())
    }

    async fn commit_batch(&self, records: &[ShadeRecord]) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        for record in records {
            docs.insert(record.shade_id.clone(), record.clone());
        }
        drop(docs);

        self.record_write();
        Ok(())
    }
}
