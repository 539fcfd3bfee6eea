//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use skintone_api::error::AppError;
use skintone_core::batch::BatchWriteError;
use skintone_core::error::CoreError;
use skintone_core::shade::FieldViolation;
use skintone_core::store::StoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Shade",
        id: "F10".to_string(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Shade with id F10 not found");
}

#[tokio::test]
async fn no_matches_returns_404() {
    let err = AppError::Core(CoreError::NoMatches("No shades found".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No shades found");
}

#[tokio::test]
async fn invalid_fields_return_400_with_details() {
    let err = AppError::Core(CoreError::InvalidFields(vec![FieldViolation {
        field: "skintone".into(),
        code: "length".into(),
        message: "skintone is required".into(),
    }]));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["details"][0]["field"], "skintone");
    assert_eq!(json["details"][0]["message"], "skintone is required");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("number is required".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "number is required");
}

#[tokio::test]
async fn unauthorized_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Missing Authorization header".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn store_error_returns_500_and_sanitizes_message() {
    let err = AppError::Core(CoreError::Store(StoreError::Backend(
        "connection to 10.0.0.5:5432 refused".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
    assert!(!json.to_string().contains("10.0.0.5"));
}

#[tokio::test]
async fn partial_batch_failure_reports_progress_only() {
    let err = AppError::Core(CoreError::BatchWrite(BatchWriteError {
        failed_chunk: 2,
        total_chunks: 3,
        committed_chunks: 1,
        committed_records: 500,
        source: StoreError::Backend("deadline exceeded on shard eu-3".into()),
    }));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "BULK_WRITE_FAILED");
    assert_eq!(json["details"]["failed_chunk"], 2);
    assert_eq!(json["details"]["committed_records"], 500);
    assert!(!json.to_string().contains("eu-3"));
}

#[tokio::test]
async fn store_timeout_returns_500() {
    let err = AppError::Core(CoreError::Store(StoreError::Timeout {
        operation: "get",
        after_ms: 10_000,
    }));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
