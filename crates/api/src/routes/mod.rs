pub mod health;
pub mod shades;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree served under the request timeout.
///
/// ```text
/// /shades                       list (?skintone=), create (auth)
/// /shades/by-number             list by numeric scale (?number=)
/// /shades/number                list by numeric scale ({ number } body)
/// /shades/{shade_id}            get, update (auth), delete (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/shades", shades::router())
}

/// Routes under `/api` that run without the request timeout.
pub fn ingest_routes() -> Router<AppState> {
    Router::new().nest("/shades", shades::ingest_router())
}
