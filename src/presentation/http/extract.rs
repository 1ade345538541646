use axum::extract::FromRequest;

use crate::presentation::http::error::ApiError;

/// `Json` whose rejections render as the 422 invalid-inputs body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ValidJson<T>(pub T);
