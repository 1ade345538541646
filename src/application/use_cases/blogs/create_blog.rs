use crate::application::access::AuthUser;
use crate::application::error::ServiceError;
use crate::application::ports::blog_repository::BlogRepository;
use crate::application::validation::validate_blog_content;
use crate::domain::blogs::blog::{Blog, BlogContent};

pub struct CreateBlog<'a, R: BlogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BlogRepository + ?Sized> CreateBlog<'a, R> {
    pub async fn execute(&self, actor: &AuthUser, content: BlogContent) -> Result<Blog, ServiceError> {
        validate_blog_content(&content)?;
        let blog = Blog::new(actor.user_id, content);
        self.repo.create_for_author(&blog).await?;
        tracing::info!(blog_id = %blog.id, author_id = %actor.user_id, "blog_created");
        Ok(blog)
    }
}
