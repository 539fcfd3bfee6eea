//! JSON and query extractors whose rejections go through [`AppError`].
//!
//! Axum's stock `Json`/`Query` reject with plain-text bodies and a mix of
//! 400/415/422 codes. These wrappers route every decoding failure through
//! [`AppError`] so clients always get the `{ "error", "code" }` envelope.

use axum::extract::{FromRequest, FromRequestParts, Query};
use axum::Json;

use crate::error::AppError;

/// `Json<T>` with [`AppError`] rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Query<T>` with [`AppError`] rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
