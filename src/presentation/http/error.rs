use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::error::ServiceError;

pub const INVALID_INPUTS: &str = "Invalid inputs passed, please check your data.";
pub const AUTH_FAILED: &str = "Authentication failed!";
pub const UNAUTHORIZED: &str = "Unauthorized!";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials, could not log you in.";
pub const ROUTE_NOT_FOUND: &str = "Could not find this route.";

/// Body of every error and of the plain acknowledgement responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_inputs() -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, INVALID_INPUTS)
    }

    pub fn auth_failed() -> Self {
        Self::new(StatusCode::FORBIDDEN, AUTH_FAILED)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND)
    }

    /// Renders a use-case failure. Lookup misses and storage failures share
    /// the operation's `failure` message; their detail is logged only.
    pub fn from_service(err: ServiceError, failure: &str) -> Self {
        match err {
            ServiceError::Validation(detail) => {
                tracing::debug!(%detail, "request_validation_failed");
                Self::invalid_inputs()
            }
            ServiceError::Conflict(message) => Self::new(StatusCode::UNPROCESSABLE_ENTITY, message),
            ServiceError::InvalidCredentials => Self::new(StatusCode::FORBIDDEN, INVALID_CREDENTIALS),
            ServiceError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, UNAUTHORIZED),
            ServiceError::NotFound => Self::new(StatusCode::INTERNAL_SERVER_ERROR, failure),
            ServiceError::Internal(e) => {
                tracing::error!(error = ?e, "request_failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, failure)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "json_body_rejected");
        Self::invalid_inputs()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(MessageResponse::new(self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_internal_share_the_operation_message() {
        let msg = "Deleting blog failed, please try again later.";
        let a = ApiError::from_service(ServiceError::NotFound, msg);
        let b = ApiError::from_service(ServiceError::Internal(anyhow::anyhow!("db down")), msg);
        assert_eq!(a.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(b.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(a.message, msg);
        assert_eq!(b.message, msg);
    }

    #[test]
    fn ownership_failure_is_401() {
        let err = ApiError::from_service(ServiceError::Unauthorized, "unused");
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, UNAUTHORIZED);
    }

    #[test]
    fn validation_detail_is_not_echoed() {
        let err = ApiError::from_service(ServiceError::validation("article too short"), "unused");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message, INVALID_INPUTS);
    }
}
