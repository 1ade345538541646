use mongodb::bson::oid::ObjectId;

use crate::domain::blogs::comment::CommentView;
use crate::domain::users::user::AuthorName;

pub const MIN_ARTICLE_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct Blog {
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub article: String,
    pub author: ObjectId,
    /// Comment ids in insertion order.
    pub comments: Vec<ObjectId>,
}

#[derive(Debug, Clone)]
pub struct BlogContent {
    pub title: String,
    pub description: String,
    pub article: String,
}

#[derive(Debug, Clone)]
pub struct BlogSummary {
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub article: String,
    pub author: AuthorName,
}

#[derive(Debug, Clone)]
pub struct BlogDetail {
    pub summary: BlogSummary,
    pub comments: Vec<CommentView>,
}

impl Blog {
    pub fn new(author: ObjectId, content: BlogContent) -> Self {
        Self {
            id: ObjectId::new(),
            title: content.title,
            description: content.description,
            article: content.article,
            author,
            comments: Vec::new(),
        }
    }

    pub fn summarize(&self, author: AuthorName) -> BlogSummary {
        BlogSummary {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            article: self.article.clone(),
            author,
        }
    }
}
