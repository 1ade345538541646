use crate::application::error::ServiceError;
use crate::application::ports::user_repository::{InsertUserError, UserRepository};
use crate::application::services::credentials::hash_password;
use crate::application::validation::{
    MIN_PASSWORD_CHARS, is_valid_email, normalize_email, require_min_chars, require_non_empty,
};
use crate::domain::users::user::{NewUser, User};

pub const EMAIL_TAKEN: &str = "User exists already, please login instead.";

pub struct Signup<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Signup<'a, R> {
    pub async fn execute(&self, req: &SignupRequest) -> Result<User, ServiceError> {
        require_non_empty("firstName", &req.first_name)?;
        require_non_empty("lastName", &req.last_name)?;
        let email = normalize_email(&req.email);
        if !is_valid_email(&email) {
            return Err(ServiceError::validation("email is not a valid address"));
        }
        require_min_chars("password", &req.password, MIN_PASSWORD_CHARS)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::Conflict(EMAIL_TAKEN.into()));
        }

        let password_hash = hash_password(&req.password)?;
        let new_user = NewUser {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email,
            password_hash,
        };
        // The unique index catches the race the lookup above cannot.
        match self.repo.insert(new_user).await {
            Ok(user) => Ok(user),
            Err(InsertUserError::DuplicateEmail) => Err(ServiceError::Conflict(EMAIL_TAKEN.into())),
            Err(InsertUserError::Storage(e)) => Err(ServiceError::Internal(e)),
        }
    }
}
