use mongodb::bson::oid::ObjectId;

use crate::application::access::{AuthUser, require_owner};
use crate::application::error::ServiceError;
use crate::application::ports::blog_repository::BlogRepository;
use crate::domain::blogs::blog::Blog;

pub struct DeleteBlog<'a, R: BlogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BlogRepository + ?Sized> DeleteBlog<'a, R> {
    pub async fn execute(&self, actor: &AuthUser, blog_id: ObjectId) -> Result<Blog, ServiceError> {
        let blog = self
            .repo
            .find_by_id(blog_id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        require_owner(&blog.author, actor)?;
        if !self.repo.delete_for_author(blog_id, actor.user_id).await? {
            return Err(ServiceError::NotFound);
        }
        tracing::info!(blog_id = %blog_id, author_id = %actor.user_id, "blog_deleted");
        Ok(blog)
    }
}
