use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

use crate::domain::users::user::AuthorName;

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: ObjectId,
    pub user: ObjectId,
    pub blog: ObjectId,
    pub content: String,
    pub date: DateTime<Utc>,
}

impl Comment {
    pub fn new(user: ObjectId, blog: ObjectId, content: String) -> Self {
        Self {
            id: ObjectId::new(),
            user,
            blog,
            content,
            date: Utc::now(),
        }
    }
}

/// A comment joined with its commenter's display name.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub id: ObjectId,
    pub user: AuthorName,
    pub content: String,
    pub date: DateTime<Utc>,
}
