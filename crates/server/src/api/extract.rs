//! Request extractors that reject with [`ApiError`].

use axum::extract::FromRequest;

use super::error::ApiError;

/// `Json` body whose rejections answer with the API's `{"error": ...}` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
