use mongodb::bson::oid::ObjectId;

use crate::application::access::{AuthUser, require_owner};
use crate::application::error::ServiceError;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::validation::require_non_empty;

pub struct UpdateComment<'a, C: CommentRepository + ?Sized> {
    pub repo: &'a C,
}

impl<'a, C: CommentRepository + ?Sized> UpdateComment<'a, C> {
    pub async fn execute(
        &self,
        actor: &AuthUser,
        comment_id: ObjectId,
        content: &str,
    ) -> Result<(), ServiceError> {
        require_non_empty("comment", content)?;
        let comment = self
            .repo
            .find_by_id(comment_id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        require_owner(&comment.user, actor)?;
        if !self.repo.update_content(comment_id, content).await? {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::blogs::test_helpers::{seed_blog, seed_user};
    use crate::domain::blogs::comment::Comment;
    use crate::infrastructure::db::memory::MemoryStore;

    #[tokio::test]
    async fn only_the_commenter_may_edit() {
        let store = MemoryStore::default();
        let author = seed_user(&store, "a@x.com").await;
        let reader = seed_user(&store, "b@x.com").await;
        let blog = seed_blog(&store, &author).await;
        let comment = Comment::new(reader.user_id, blog.id, "orig".into());
        store.create_on_blog(&comment).await.unwrap();
        let uc = UpdateComment { repo: &store };

        // The blog's author does not own the comment.
        let err = uc.execute(&author, comment.id, "edited").await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
        assert_eq!(store.comment(comment.id).await.unwrap().content, "orig");

        uc.execute(&reader, comment.id, "edited").await.unwrap();
        assert_eq!(store.comment(comment.id).await.unwrap().content, "edited");
    }
}
