//! PostgreSQL persistence for the shade catalog.
//!
//! - [`shade_store::PgShadeStore`] -- the `ShadeStore` gateway over the `shades` table.
//! - [`create_pool`], [`health_check`], [`run_migrations`] -- bootstrap helpers used by the binary.

pub mod models;
pub mod shade_store;

use sqlx::postgres::PgPoolOptions;

pub use shade_store::PgShadeStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to prove the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the bundled migrations (creates the `shades` table).
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
