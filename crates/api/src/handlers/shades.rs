//! Handlers for the shade catalog.
//!
//! Reads are public. Create, update and delete require [`RequireAuth`], which
//! runs before the body is decoded.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use skintone_core::payload::{self, ShadeSubmission};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/shades`.
#[derive(Debug, Deserialize)]
pub struct ShadeListParams {
    pub skintone: Option<String>,
}

/// Query parameters for `GET /api/shades/by-number`.
#[derive(Debug, Deserialize)]
pub struct NumberParams {
    pub number: Option<i64>,
}

/// Body of `POST /api/shades/number`.
#[derive(Debug, Deserialize)]
pub struct NumberBody {
    pub number: Option<i64>,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/shades
///
/// List all shades, or only those with the given `skintone`. 404 when
/// nothing matches.
pub async fn list_shades(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ShadeListParams>,
) -> AppResult<impl IntoResponse> {
    let shades = state.catalog.list_shades(params.skintone.as_deref()).await?;
    Ok(Json(shades))
}

/// GET /api/shades/{shade_id}
pub async fn get_shade(
    State(state): State<AppState>,
    Path(shade_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let shade = state.catalog.get_shade(&shade_id).await?;
    Ok(Json(shade))
}

/// GET /api/shades/by-number?number=N
///
/// Map `N` (1-10) to a skintone category and list its shades.
pub async fn list_shades_by_number(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<NumberParams>,
) -> AppResult<impl IntoResponse> {
    let number = params
        .number
        .ok_or_else(|| AppError::BadRequest("number query parameter is required".into()))?;
    shades_for_number(&state, number).await
}

/// POST /api/shades/number
///
/// Same as [`list_shades_by_number`] with the number in the body.
pub async fn lookup_shades_by_number(
    State(state): State<AppState>,
    AppJson(body): AppJson<NumberBody>,
) -> AppResult<impl IntoResponse> {
    let number = body
        .number
        .ok_or_else(|| AppError::BadRequest("number is required".into()))?;
    shades_for_number(&state, number).await
}

async fn shades_for_number(state: &AppState, number: i64) -> AppResult<impl IntoResponse> {
    let (label, shades) = state.catalog.list_shades_by_number(number).await?;
    tracing::debug!(number, skintone = %label, count = shades.len(), "Resolved skintone number");
    Ok(Json(shades))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/shades
///
/// An array is validated as a whole and written in atomic chunks; the
/// response is an acknowledgment. A single object is upserted and echoed.
/// Fields of the wrong type are reported per field, like any other rule.
pub async fn create_shades(
    RequireAuth(principal): RequireAuth,
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> AppResult<impl IntoResponse> {
    match ShadeSubmission::from_json(body)? {
        ShadeSubmission::Many(items) => {
            let summary = state.catalog.create_shades_bulk(items).await?;
            tracing::info!(
                subject = %principal.subject,
                count = summary.count,
                chunks = summary.chunks,
                "Shades created"
            );
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "message": "Shades created",
                    "count": summary.count,
                    "chunks": summary.chunks,
                })),
            ))
        }
        ShadeSubmission::One(item) => {
            let shade = state.catalog.create_shade(item).await?;
            tracing::info!(
                subject = %principal.subject,
                shade_id = %shade.shade_id,
                "Shade created"
            );
            Ok((StatusCode::CREATED, Json(json!(shade))))
        }
    }
}

/// PUT /api/shades/{shade_id}
///
/// Replace every mutable field. 404 if the shade does not exist.
pub async fn update_shade(
    RequireAuth(principal): RequireAuth,
    State(state): State<AppState>,
    Path(shade_id): Path<String>,
    AppJson(body): AppJson<Value>,
) -> AppResult<impl IntoResponse> {
    let input = payload::decode_update(body)?;
    let shade = state.catalog.update_shade(&shade_id, input).await?;
    tracing::info!(subject = %principal.subject, shade_id = %shade_id, "Shade updated via API");
    Ok(Json(shade))
}

/// DELETE /api/shades/{shade_id}
pub async fn delete_shade(
    RequireAuth(principal): RequireAuth,
    State(state): State<AppState>,
    Path(shade_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.catalog.delete_shade(&shade_id).await?;
    tracing::info!(subject = %principal.subject, shade_id = %shade_id, "Shade deleted via API");
    Ok(Json(json!({
        "message": "Shade deleted",
        "shade_id": shade_id,
    })))
}
