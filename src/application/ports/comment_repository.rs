use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::blogs::comment::Comment;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Comment>>;

    // Unknown ids are skipped; result order is unspecified.
    async fn find_many(&self, ids: &[ObjectId]) -> anyhow::Result<Vec<Comment>>;

    /// Inserts the comment and pushes its id onto the parent blog's `comments`.
    async fn create_on_blog(&self, comment: &Comment) -> anyhow::Result<()>;

    async fn update_content(&self, id: ObjectId, content: &str) -> anyhow::Result<bool>;

    /// Deletes the comment and pulls its id from the parent blog. The stored
    /// `blog` reference is tried first; any blog still listing the id is the
    /// fallback.
    async fn delete_from_blog(&self, comment: &Comment) -> anyhow::Result<bool>;
}
