use mongodb::bson::oid::ObjectId;

use crate::application::access::AuthUser;
use crate::application::error::ServiceError;
use crate::application::ports::blog_repository::BlogRepository;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::validation::require_non_empty;
use crate::domain::blogs::comment::Comment;

pub struct MakeComment<'a, B, C>
where
    B: BlogRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub blogs: &'a B,
    pub comments: &'a C,
}

impl<'a, B, C> MakeComment<'a, B, C>
where
    B: BlogRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &AuthUser,
        blog_id: ObjectId,
        content: String,
    ) -> Result<Comment, ServiceError> {
        require_non_empty("comment", &content)?;
        let blog = self
            .blogs
            .find_by_id(blog_id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        let comment = Comment::new(actor.user_id, blog.id, content);
        self.comments.create_on_blog(&comment).await?;
        tracing::info!(comment_id = %comment.id, blog_id = %blog.id, user_id = %actor.user_id, "comment_created");
        Ok(comment)
    }
}
