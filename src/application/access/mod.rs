use mongodb::bson::oid::ObjectId;

use crate::application::error::ServiceError;
use crate::domain::users::user::{AuthorName, User};

/// Identity decoded from a bearer token and attached to each authenticated
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: ObjectId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl AuthUser {
    pub fn display_name(&self) -> AuthorName {
        AuthorName {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

// Ownership is always checked against freshly loaded state, never against
// anything carried in the token beyond the caller id.
pub fn require_owner(owner: &ObjectId, actor: &AuthUser) -> Result<(), ServiceError> {
    if owner == &actor.user_id {
        Ok(())
    } else {
        tracing::debug!(owner = %owner, caller = %actor.user_id, "ownership_check_failed");
        Err(ServiceError::Unauthorized)
    }
}
