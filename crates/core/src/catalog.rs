//! Shade catalog service.
//!
//! The façade the HTTP layer calls. It owns no state of its own: every
//! operation validates input, talks to the injected [`ShadeStore`] and hands
//! back serializable records or a [`CoreError`].

use std::sync::Arc;

use crate::batch::{BatchSummary, BatchedWriter, MAX_BATCH_CHUNK};
use crate::error::CoreError;
use crate::shade::{self, CreateShade, ShadeRecord, UpdateShade};
use crate::skintone::{self, SkintoneLabel, SCALE_MAX, SCALE_MIN};
use crate::store::{ShadeField, ShadeStore, StoreError};

/// Entity name used in not-found errors.
const ENTITY: &str = "Shade";

#[derive(Clone)]
pub struct ShadeCatalog {
    store: Arc<dyn ShadeStore>,
    chunk_size: usize,
}

impl ShadeCatalog {
    /// Catalog with the default bulk chunk size.
    pub fn new(store: Arc<dyn ShadeStore>) -> Self {
        Self::with_chunk_size(store, MAX_BATCH_CHUNK)
    }

    pub fn with_chunk_size(store: Arc<dyn ShadeStore>, chunk_size: usize) -> Self {
        Self { store, chunk_size }
    }

    /// List shades, optionally restricted to one skintone.
    ///
    /// A filter naming a canonical category in any case (`"fair"`,
    /// `"light_medium"`) is matched against its canonical text. Anything else
    /// is matched verbatim, after trimming, so legacy free-form labels still
    /// work. An empty result is [`CoreError::NoMatches`].
    pub async fn list_shades(&self, skintone: Option<&str>) -> Result<Vec<ShadeRecord>, CoreError> {
        let filter = skintone.map(str::trim).filter(|s| !s.is_empty());

        let shades = match filter {
            Some(raw) => {
                let value = normalize_skintone_filter(raw);
                self.store
                    .query_by_field(ShadeField::Skintone, &value)
                    .await?
            }
            None => self.store.get_all().await?,
        };

        if shades.is_empty() {
            return Err(CoreError::NoMatches(match filter {
                Some(raw) => format!("No shades found for skintone '{raw}'"),
                None => "No shades found".to_string(),
            }));
        }
        Ok(shades)
    }

    pub async fn get_shade(&self, shade_id: &str) -> Result<ShadeRecord, CoreError> {
        self.store
            .get(shade_id)
            .await?
            .ok_or_else(|| not_found(shade_id))
    }

    /// Validate and upsert one shade. Returns the stored record.
    pub async fn create_shade(&self, payload: CreateShade) -> Result<ShadeRecord, CoreError> {
        let record = shade::validate_create(payload)?;
        self.store.set(&record).await?;

        tracing::info!(shade_id = %record.shade_id, "Shade stored");
        Ok(record)
    }

    /// Validate a whole batch, then write it in sequential atomic chunks.
    ///
    /// Nothing is written if any element is invalid. A store failure part-way
    /// through surfaces as [`CoreError::BatchWrite`] with earlier chunks
    /// already persisted.
    pub async fn create_shades_bulk(
        &self,
        payload: Vec<CreateShade>,
    ) -> Result<BatchSummary, CoreError> {
        let records = shade::validate_batch(payload)?;
        let summary = BatchedWriter::new(self.store.as_ref(), self.chunk_size)
            .commit(&records)
            .await?;
        Ok(summary)
    }

    /// Replace the mutable fields of an existing shade.
    ///
    /// Identity comes from `shade_id`, never from the payload. An unknown id
    /// is reported before validation and without touching the store.
    pub async fn update_shade(
        &self,
        shade_id: &str,
        payload: UpdateShade,
    ) -> Result<ShadeRecord, CoreError> {
        self.get_shade(shade_id).await?;
        let fields = shade::validate_update(payload)?;
        let updated = self
            .store
            .update(shade_id, &fields)
            .await
            .map_err(|err| missing_as_not_found(err, shade_id))?;

        tracing::info!(shade_id, "Shade updated");
        Ok(updated)
    }

    /// Remove an existing shade. An unknown id is [`CoreError::NotFound`].
    pub async fn delete_shade(&self, shade_id: &str) -> Result<(), CoreError> {
        self.get_shade(shade_id).await?;
        self.store
            .delete(shade_id)
            .await
            .map_err(|err| missing_as_not_found(err, shade_id))?;

        tracing::info!(shade_id, "Shade deleted");
        Ok(())
    }

    /// List shades for a position on the 1-10 skintone scale.
    pub async fn list_shades_by_number(
        &self,
        number: i64,
    ) -> Result<(SkintoneLabel, Vec<ShadeRecord>), CoreError> {
        let label = skintone::classify(number).ok_or_else(|| {
            CoreError::Validation(format!(
                "No skintone category for number {number}; expected an integer from {SCALE_MIN} to {SCALE_MAX}"
            ))
        })?;

        let shades = self.list_shades(Some(label.as_str())).await?;
        Ok((label, shades))
    }
}

fn normalize_skintone_filter(raw: &str) -> String {
    match raw.parse::<SkintoneLabel>() {
        Ok(label) => label.as_str().to_string(),
        Err(_) => raw.to_string(),
    }
}

fn not_found(shade_id: &str) -> CoreError {
    CoreError::NotFound {
        entity: ENTITY,
        id: shade_id.to_string(),
    }
}

/// The document can vanish between the existence check and the write.
fn missing_as_not_found(err: StoreError, shade_id: &str) -> CoreError {
    match err {
        StoreError::Missing(_) => not_found(shade_id),
        other => CoreError::Store(other),
    }
}
