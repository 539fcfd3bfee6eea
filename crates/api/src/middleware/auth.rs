//! Authorization extractor for mutating routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an "authorized" verdict from [`AppState::authorizer`].
///
/// Place it first in a handler's argument list. Header-only extractors run
/// before the body is read, so a denied request never reaches payload
/// validation or the store.
///
/// ```ignore
/// async fn delete_shade(RequireAuth(principal): RequireAuth) -> AppResult<Json<()>> {
///     tracing::info!(subject = %principal.subject, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub Principal);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = state.authorizer.authorize(&parts.headers).map_err(|denied| {
            tracing::warn!(reason = %denied, path = %parts.uri.path(), "Request denied");
            AppError::from(denied)
        })?;
        Ok(RequireAuth(principal))
    }
}
