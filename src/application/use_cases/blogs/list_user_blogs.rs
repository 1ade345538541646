use crate::application::access::AuthUser;
use crate::application::error::ServiceError;
use crate::application::ports::blog_repository::BlogRepository;
use crate::domain::blogs::blog::Blog;
use crate::domain::users::user::AuthorName;

pub struct ListUserBlogs<'a, R: BlogRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BlogRepository + ?Sized> ListUserBlogs<'a, R> {
    // The author name comes from the token, not from a fresh user lookup.
    pub async fn execute(&self, actor: &AuthUser) -> Result<(Vec<Blog>, AuthorName), ServiceError> {
        let blogs = self.repo.list_by_author(actor.user_id).await?;
        Ok((blogs, actor.display_name()))
    }
}
