use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};

use crate::application::ports::user_repository::{InsertUserError, UserRepository};
use crate::domain::users::user::{NewUser, User};
use crate::infrastructure::db::MongoStore;
use crate::infrastructure::db::documents::UserDocument;

const DUPLICATE_KEY: i32 = 11000;

pub struct MongoUserRepository {
    pub store: MongoStore,
}

impl MongoUserRepository {
    pub fn new(store: MongoStore) -> Self {
        Self { store }
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == DUPLICATE_KEY,
        ErrorKind::Command(ce) => ce.code == DUPLICATE_KEY,
        _ => false,
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, InsertUserError> {
        let record = UserDocument {
            id: ObjectId::new(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password: user.password_hash,
            blogs: Vec::new(),
        };
        match self.store.users.insert_one(&record).await {
            Ok(_) => Ok(record.into()),
            Err(e) if is_duplicate_key(&e) => Err(InsertUserError::DuplicateEmail),
            Err(e) => Err(InsertUserError::Storage(e.into())),
        }
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let found = self.store.users.find_one(doc! { "email": email }).await?;
        Ok(found.map(User::from))
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<User>> {
        let found = self.store.users.find_one(doc! { "_id": id }).await?;
        Ok(found.map(User::from))
    }

    async fn find_many(&self, ids: &[ObjectId]) -> anyhow::Result<Vec<User>> {
        let cursor = self
            .store
            .users
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        let docs: Vec<UserDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(User::from).collect())
    }
}
