//! Row types for the `shades` table.

use skintone_core::shade::ShadeRecord;
use sqlx::FromRow;

pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A row from the `shades` table.
///
/// The bookkeeping timestamps stay in the database layer; the catalog only
/// ever sees the six document fields.
#[derive(Debug, Clone, FromRow)]
pub struct ShadeRow {
    pub shade_id: String,
    pub description: String,
    pub image_url: String,
    pub skintone: String,
    pub source: String,
    pub recommended_brands: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ShadeRow> for ShadeRecord {
    fn from(row: ShadeRow) -> Self {
        ShadeRecord {
            shade_id: row.shade_id,
            description: row.description,
            image_url: row.image_url,
            skintone: row.skintone,
            source: row.source,
            recommended_brands: row.recommended_brands,
        }
    }
}
