use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::blogs::blog::{Blog, BlogContent};

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn list_all(&self) -> anyhow::Result<Vec<Blog>>;

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Blog>>;

    async fn list_by_author(&self, author: ObjectId) -> anyhow::Result<Vec<Blog>>;

    /// Inserts the blog and appends its id to the author's `blogs` list.
    async fn create_for_author(&self, blog: &Blog) -> anyhow::Result<()>;

    // Returns the updated blog, or None when it no longer exists
    async fn update_content(
        &self,
        id: ObjectId,
        content: &BlogContent,
    ) -> anyhow::Result<Option<Blog>>;

    /// Deletes the blog and pulls its id from the author's `blogs` list.
    /// Returns false when there was nothing to delete.
    async fn delete_for_author(&self, id: ObjectId, author: ObjectId) -> anyhow::Result<bool>;
}
