use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::users::user::{NewUser, User};

#[derive(thiserror::Error, Debug)]
pub enum InsertUserError {
    #[error("email is already registered")]
    DuplicateEmail,
    #[error("failed to persist user")]
    Storage(#[source] anyhow::Error),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, InsertUserError>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<User>>;
    // Unknown ids are skipped; result order is unspecified.
    async fn find_many(&self, ids: &[ObjectId]) -> anyhow::Result<Vec<User>>;
}
