//! Document store gateway.
//!
//! [`ShadeStore`] is the only seam between the catalog and persistence. It
//! models a keyed document collection: point reads, single-field equality
//! queries, upserts, partial updates, deletes and an all-or-nothing batch
//! write. Implementations:
//!
//! - [`memory::MemoryShadeStore`] -- in-process map, used by tests and local runs.
//! - [`timed::TimedStore`] -- decorator bounding every call with a timeout.
//! - `skintone_db::PgShadeStore` -- PostgreSQL.

pub mod memory;
pub mod timed;

use async_trait::async_trait;

use crate::shade::{ShadeFields, ShadeRecord};

pub use memory::MemoryShadeStore;
pub use timed::TimedStore;

/// Fields a store can filter on with an equality match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadeField {
    Skintone,
}

impl ShadeField {
    /// Field name as it appears in the stored document.
    pub fn as_str(self) -> &'static str {
        match self {
            ShadeField::Skintone => "skintone",
        }
    }

    /// Read this field from a record.
    pub fn value_of(self, record: &ShadeRecord) -> &str {
        match self {
            ShadeField::Skintone => &record.skintone,
        }
    }
}

/// Failure reported by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `update` or `delete` targeted a document that does not exist.
    #[error("document '{0}' does not exist")]
    Missing(String),

    /// The call did not complete within the configured bound.
    #[error("store {operation} timed out after {after_ms}ms")]
    Timeout {
        operation: &'static str,
        after_ms: u64,
    },

    /// Any other backend failure (connection, constraint, serialization).
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Capability interface over the external document collection.
///
/// Listing methods return records ordered by `shade_id`.
#[async_trait]
pub trait ShadeStore: Send + Sync {
    /// Point read by document key.
    async fn get(&self, shade_id: &str) -> Result<Option<ShadeRecord>, StoreError>;

    /// All records whose `field` equals `value` exactly. May be empty.
    async fn query_by_field(
        &self,
        field: ShadeField,
        value: &str,
    ) -> Result<Vec<ShadeRecord>, StoreError>;

    /// Every record in the collection.
    async fn get_all(&self) -> Result<Vec<ShadeRecord>, StoreError>;

    /// Upsert keyed by `record.shade_id`.
    async fn set(&self, record: &ShadeRecord) -> Result<(), StoreError>;

    /// Replace the mutable fields of an existing record.
    ///
    /// Fails with [`StoreError::Missing`] if the document does not exist.
    async fn update(
        &self,
        shade_id: &str,
        fields: &ShadeFields,
    ) -> Result<ShadeRecord, StoreError>;

    /// Remove a record. Fails with [`StoreError::Missing`] if absent.
    async fn delete(&self, shade_id: &str) -> Result<(), StoreError>;

    /// Upsert every record as one atomic unit: either all are written or none.
    async fn commit_batch(&self, records: &[ShadeRecord]) -> Result<(), StoreError>;
}
