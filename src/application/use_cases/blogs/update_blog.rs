use mongodb::bson::oid::ObjectId;

use crate::application::access::{AuthUser, require_owner};
use crate::application::error::ServiceError;
use crate::application::ports::blog_repository::BlogRepository;
use crate::application::validation::validate_blog_content;
use crate::domain::blogs::blog::{Blog, BlogContent};

pub struct UpdateBlog<'a, R: BlogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BlogRepository + ?Sized> UpdateBlog<'a, R> {
    pub async fn execute(
        &self,
        actor: &AuthUser,
        blog_id: ObjectId,
        content: BlogContent,
    ) -> Result<Blog, ServiceError> {
        validate_blog_content(&content)?;
        let blog = self
            .repo
            .find_by_id(blog_id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        require_owner(&blog.author, actor)?;
        self.repo
            .update_content(blog_id, &content)
            .await?
            .ok_or(ServiceError::NotFound)
    }
}
