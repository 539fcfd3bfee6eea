//! `ShadeStore` implementation over the `shades` table.
//!
//! Writes are upserts (`ON CONFLICT (shade_id) DO UPDATE`), and a batch is
//! one transaction, which gives the all-or-nothing chunk semantics the
//! catalog's bulk writer relies on.

use async_trait::async_trait;
use skintone_core::shade::{ShadeFields, ShadeRecord};
use skintone_core::store::{ShadeField, ShadeStore, StoreError};
use sqlx::{PgExecutor, PgPool};

use crate::models::ShadeRow;

/// Column list for `shades` queries.
const SHADE_COLUMNS: &str = "\
    shade_id, description, image_url, skintone, source, recommended_brands, \
    created_at, updated_at";

/// Upsert statement shared by `set` and `commit_batch`.
const UPSERT_SQL: &str = "\
    INSERT INTO shades (shade_id, description, image_url, skintone, source, recommended_brands) \
    VALUES ($1, $2, $3, $4, $5, $6) \
    ON CONFLICT (shade_id) DO UPDATE SET \
        description = EXCLUDED.description, \
        image_url = EXCLUDED.image_url, \
        skintone = EXCLUDED.skintone, \
        source = EXCLUDED.source, \
        recommended_brands = EXCLUDED.recommended_brands, \
        updated_at = now()";

/// Column backing each filterable field. Only these static names are ever
/// interpolated into SQL.
fn column_for(field: ShadeField) -> &'static str {
    match field {
        ShadeField::Skintone => "skintone",
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    tracing::error!(error = %err, "Shade store query failed");
    StoreError::Backend(err.to_string())
}

/// PostgreSQL-backed shade store.
#[derive(Debug, Clone)]
pub struct PgShadeStore {
    pool: PgPool,
}

impl PgShadeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn upsert<'e, E: PgExecutor<'e>>(
        executor: E,
        record: &ShadeRecord,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(UPSERT_SQL)
            .bind(&record.shade_id)
            .bind(&record.description)
            .bind(&record.image_url)
            .bind(&record.skintone)
            .bind(&record.source)
            .bind(record.recommended_brands.as_slice())
            .execute(executor)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ShadeStore for PgShadeStore {
    async fn get(&self, shade_id: &str) -> Result<Option<ShadeRecord>, StoreError> {
        let query = format!("SELECT {SHADE_COLUMNS} FROM shades WHERE shade_id = $1");
        let row = sqlx::query_as::<_, ShadeRow>(&query)
            .bind(shade_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        Ok(row.map(ShadeRecord::from))
    }

    async fn query_by_field(
        &self,
        field: ShadeField,
        value: &str,
    ) -> Result<Vec<ShadeRecord>, StoreError> {
        let query = format!(
            "SELECT {SHADE_COLUMNS} FROM shades WHERE {} = $1 ORDER BY shade_id",
            column_for(field)
        );
        let rows = sqlx::query_as::<_, ShadeRow>(&query)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(ShadeRecord::from).collect())
    }

    async fn get_all(&self) -> Result<Vec<ShadeRecord>, StoreError> {
        let query = format!("SELECT {SHADE_COLUMNS} FROM shades ORDER BY shade_id");
        let rows = sqlx::query_as::<_, ShadeRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(ShadeRecord::from).collect())
    }

    async fn set(&self, record: &ShadeRecord) -> Result<(), StoreError> {
        Self::upsert(&self.pool, record).await.map_err(backend)
    }

    async fn update(
        &self,
        shade_id: &str,
        fields: &ShadeFields,
    ) -> Result<ShadeRecord, StoreError> {
        let query = format!(
            "UPDATE shades SET \
                description = $2, image_url = $3, skintone = $4, source = $5, \
                recommended_brands = $6, updated_at = now() \
             WHERE shade_id = $1 \
             RETURNING {SHADE_COLUMNS}"
        );
        sqlx::query_as::<_, ShadeRow>(&query)
            .bind(shade_id)
            .bind(&fields.description)
            .bind(&fields.image_url)
            .bind(&fields.skintone)
            .bind(&fields.source)
            .bind(fields.recommended_brands.as_slice())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .map(ShadeRecord::from)
            .ok_or_else(|| StoreError::Missing(shade_id.to_string()))
    }

    async fn delete(&self, shade_id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM shades WHERE shade_id = $1")
            .bind(shade_id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(shade_id.to_string()));
        }
        Ok(())
    }

    async fn commit_batch(&self, records: &[ShadeRecord]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;
        for record in records {
            // Dropping `tx` on error rolls the whole chunk back.
            Self::upsert(&mut *tx, record).await.map_err(backend)?;
        }
        tx.commit().await.map_err(backend)
    }
}
