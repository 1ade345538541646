use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::domain::blogs::blog::Blog;
use crate::domain::blogs::comment::Comment;
use crate::domain::users::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub blogs: Vec<ObjectId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub article: String,
    pub author: ObjectId,
    #[serde(default)]
    pub comments: Vec<ObjectId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: ObjectId,
    pub blog: ObjectId,
    pub content: String,
    pub date: bson::DateTime,
}

impl From<UserDocument> for User {
    fn from(d: UserDocument) -> Self {
        User {
            id: d.id,
            first_name: d.first_name,
            last_name: d.last_name,
            email: d.email,
            password_hash: d.password,
            blogs: d.blogs,
        }
    }
}

impl From<&Blog> for BlogDocument {
    fn from(b: &Blog) -> Self {
        BlogDocument {
            id: b.id,
            title: b.title.clone(),
            description: b.description.clone(),
            article: b.article.clone(),
            author: b.author,
            comments: b.comments.clone(),
        }
    }
}

impl From<BlogDocument> for Blog {
    fn from(d: BlogDocument) -> Self {
        Blog {
            id: d.id,
            title: d.title,
            description: d.description,
            article: d.article,
            author: d.author,
            comments: d.comments,
        }
    }
}

impl From<&Comment> for CommentDocument {
    fn from(c: &Comment) -> Self {
        CommentDocument {
            id: c.id,
            user: c.user,
            blog: c.blog,
            content: c.content.clone(),
            date: bson::DateTime::from_millis(c.date.timestamp_millis()),
        }
    }
}

impl From<CommentDocument> for Comment {
    fn from(d: CommentDocument) -> Self {
        Comment {
            id: d.id,
            user: d.user,
            blog: d.blog,
            content: d.content,
            date: chrono::DateTime::from_timestamp_millis(d.date.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}
