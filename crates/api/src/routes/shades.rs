//! Route definitions for the shade catalog.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::shades;
use crate::state::AppState;

/// Shade routes mounted at `/api/shades`, except ingest (see [`ingest_router`]).
///
/// ```text
/// GET    /                 -> list_shades              (?skintone=)
/// GET    /by-number        -> list_shades_by_number    (?number=)
/// POST   /number           -> lookup_shades_by_number
/// GET    /{shade_id}       -> get_shade
/// PUT    /{shade_id}       -> update_shade             (auth)
/// DELETE /{shade_id}       -> delete_shade             (auth)
/// ```
///
/// The static `/by-number` and `/number` segments take precedence over the
/// `{shade_id}` capture.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(shades::list_shades))
        .route("/by-number", get(shades::list_shades_by_number))
        .route("/number", post(shades::lookup_shades_by_number))
        .route(
            "/{shade_id}",
            get(shades::get_shade)
                .put(shades::update_shade)
                .delete(shades::delete_shade),
        )
}

/// `POST /api/shades` -> `create_shades` (auth).
///
/// Kept out of the request timeout: a bulk ingest commits chunk by chunk, and
/// cutting it off between chunks would hide how far it got. Each chunk commit
/// is bounded by the store timeout instead.
pub fn ingest_router() -> Router<AppState> {
    Router::new().route("/", post(shades::create_shades))
}
