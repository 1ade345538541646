/// Failure taxonomy shared by every use case. The presentation layer decides
/// how each variant is rendered; storage detail never leaves the process.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("caller does not own this resource")]
    Unauthorized,
    #[error("resource not found")]
    NotFound,
    #[error("internal failure")]
    Internal(#[source] anyhow::Error),
}

impl ServiceError {
    pub fn validation(detail: impl Into<String>) -> Self {
        ServiceError::Validation(detail.into())
    }
}

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        ServiceError::Internal(err)
    }
}
