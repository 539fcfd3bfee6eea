use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use skintone_core::error::CoreError;

use crate::auth::AuthDenied;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `skintone_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body was not the JSON we expected.
    #[error(transparent)]
    Json(#[from] JsonRejection),

    /// The query string could not be decoded.
    #[error(transparent)]
    Query(#[from] QueryRejection),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<AuthDenied> for AppError {
    fn from(denied: AuthDenied) -> Self {
        AppError::Core(CoreError::Unauthorized(denied.to_string()))
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details): (StatusCode, &str, String, Option<Value>) =
            match &self {
                // --- CoreError variants ---
                AppError::Core(core) => match core {
                    CoreError::NotFound { entity, id } => (
                        StatusCode::NOT_FOUND,
                        "NOT_FOUND",
                        format!("{entity} with id {id} not found"),
                        None,
                    ),
                    CoreError::NoMatches(msg) => {
                        (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None)
                    }
                    CoreError::Validation(msg) => (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        msg.clone(),
                        None,
                    ),
                    CoreError::InvalidFields(violations) => (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        "Invalid shade payload".to_string(),
                        Some(json!(violations)),
                    ),
                    CoreError::Unauthorized(msg) => {
                        (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
                    }
                    CoreError::Store(err) => {
                        tracing::error!(error = %err, "Shade store error");
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "INTERNAL_ERROR",
                            INTERNAL_MESSAGE.to_string(),
                            None,
                        )
                    }
                    CoreError::BatchWrite(err) => {
                        tracing::error!(
                            failed_chunk = err.failed_chunk,
                            total_chunks = err.total_chunks,
                            committed_records = err.committed_records,
                            error = %err.source,
                            "Bulk shade write failed part-way"
                        );
                        // Progress is reported so the client can resume; the
                        // store's own diagnostics are not.
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "BULK_WRITE_FAILED",
                            INTERNAL_MESSAGE.to_string(),
                            Some(json!({
                                "failed_chunk": err.failed_chunk,
                                "total_chunks": err.total_chunks,
                                "committed_chunks": err.committed_chunks,
                                "committed_records": err.committed_records,
                            })),
                        )
                    }
                },

                // --- Extractor rejections keep their own status ---
                AppError::Json(rejection) => (
                    rejection.status(),
                    rejection_code(rejection.status()),
                    rejection.body_text(),
                    None,
                ),
                AppError::Query(rejection) => (
                    rejection.status(),
                    rejection_code(rejection.status()),
                    rejection.body_text(),
                    None,
                ),

                // --- HTTP-specific errors ---
                AppError::BadRequest(msg) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
                }
            };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, axum::Json(body)).into_response()
    }
}

fn rejection_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        _ => "BAD_REQUEST",
    }
}
