use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::ApiError;

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Rejects the request with 403 unless it carries a valid bearer token.
/// On success the caller's `AuthUser` is added to the request extensions.
pub async fn require_auth(State(ctx): State<AppContext>, mut req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    let Some(token) = bearer_token(req.headers()).map(str::to_owned) else {
        tracing::debug!(uri = %req.uri(), "bearer_token_missing");
        return ApiError::auth_failed().into_response();
    };

    match ctx.tokens().validate(&token) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(reason = %e, "bearer_token_rejected");
            ApiError::auth_failed().into_response()
        }
    }
}
