//! Request body extractor whose rejections use the API error format.

use axum::extract::FromRequest;

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] on request bodies.
///
/// Bodies that fail to deserialize are rejected as a 400 `VALIDATION_ERROR`
/// instead of axum's plain-text 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
