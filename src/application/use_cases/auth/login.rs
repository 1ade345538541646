use crate::application::error::ServiceError;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::credentials::verify_password;
use crate::application::validation::{is_valid_email, normalize_email, require_non_empty};
use crate::domain::users::user::User;

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn execute(&self, req: &LoginRequest) -> Result<User, ServiceError> {
        let email = normalize_email(&req.email);
        if !is_valid_email(&email) {
            return Err(ServiceError::validation("email is not a valid address"));
        }
        require_non_empty("password", &req.password)?;
        let Some(user) = self.repo.find_by_email(&email).await? else {
            return Err(ServiceError::InvalidCredentials);
        };
        if verify_password(&req.password, &user.password_hash) {
            Ok(user)
        } else {
            Err(ServiceError::InvalidCredentials)
        }
    }
}
