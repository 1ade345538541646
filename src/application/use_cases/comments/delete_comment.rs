use mongodb::bson::oid::ObjectId;

use crate::application::access::{AuthUser, require_owner};
use crate::application::error::ServiceError;
use crate::application::ports::comment_repository::CommentRepository;

pub struct DeleteComment<'a, C: CommentRepository + ?Sized> {
    pub repo: &'a C,
}

impl<'a, C: CommentRepository + ?Sized> DeleteComment<'a, C> {
    pub async fn execute(&self, actor: &AuthUser, comment_id: ObjectId) -> Result<(), ServiceError> {
        let comment = self
            .repo
            .find_by_id(comment_id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        require_owner(&comment.user, actor)?;
        if !self.repo.delete_from_blog(&comment).await? {
            return Err(ServiceError::NotFound);
        }
        tracing::info!(comment_id = %comment_id, blog_id = %comment.blog, "comment_deleted");
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
    async fn delete_unlinks_from_parent_then_is_gone() {
        let store = MemoryStore::default();
        let author = seed_user(&store, "a@x.com").await;
        let blog = seed_blog(&store, &author).await;
        let keep = Comment::new(author.user_id, blog.id, "keep".into());
        let gone = Comment::new(author.user_id, blog.id, "gone".into());
        store.create_on_blog(&keep).await.unwrap();
        store.create_on_blog(&gone).await.unwrap();
        let uc = DeleteComment { repo: &store };

        uc.execute(&author, gone.id).await.unwrap();
        assert!(store.comment(gone.id).await.is_none());
        assert_eq!(store.blog(blog.id).await.unwrap().comments, vec![keep.id]);

        let again = uc.execute(&author, gone.id).await.unwrap_err();
        assert!(matches!(again, ServiceError::NotFound));
    }

    #[tokio::test]
    async fn stranger_cannot_delete() {
        let store = MemoryStore::default();
        let author = seed_user(&store, "a@x.com").await;
        let stranger = seed_user(&store, "c@x.com").await;
        let blog = seed_blog(&store, &author).await;
        let comment = Comment::new(author.user_id, blog.id, "mine".into());
        store.create_on_blog(&comment).await.unwrap();

        let err = DeleteComment { repo: &store }
            .execute(&stranger, comment.id)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Unauthorized));
        assert!(store.comment(comment.id).await.is_some());
        assert_eq!(store.blog(blog.id).await.unwrap().comments, vec![comment.id]);
    }

    #[tokio::test]
    async fn stale_parent_reference_falls_back_to_search() {
        let store = MemoryStore::default();
        let author = seed_user(&store, "a@x.com").await;
        let blog = seed_blog(&store, &author).await;
        let comment = Comment::new(author.user_id, blog.id, "moved".into());
        store.create_on_blog(&comment).await.unwrap();
        // Point the stored parent somewhere that does not list the comment.
        store.repoint_comment(comment.id, ObjectId::new()).await;

        DeleteComment { repo: &store }
            .execute(&author, comment.id)
            .await
            .unwrap();

        assert!(store.blog(blog.id).await.unwrap().comments.is_empty());
    }
}
