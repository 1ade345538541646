use anyhow::Context;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::application::ports::comment_repository::CommentRepository;
use crate::domain::blogs::comment::Comment;
use crate::infrastructure::db::documents::CommentDocument;
use crate::infrastructure::db::{MongoStore, in_session};

pub struct MongoCommentRepository {
    pub store: MongoStore,
}

impl MongoCommentRepository {
    pub fn new(store: MongoStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepository for MongoCommentRepository {
    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Comment>> {
        let found = self.store.comments.find_one(doc! { "_id": id }).await?;
        Ok(found.map(Comment::from))
    }

    async fn find_many(&self, ids: &[ObjectId]) -> anyhow::Result<Vec<Comment>> {
        let cursor = self
            .store
            .comments
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        let docs: Vec<CommentDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Comment::from).collect())
    }

    async fn create_on_blog(&self, comment: &Comment) -> anyhow::Result<()> {
        let record = CommentDocument::from(comment);
        let mut session = self.store.begin().await?;

        in_session!(self.store.comments.insert_one(&record), session).context("insert comment")?;

        let linked = in_session!(
            self.store.blogs.update_one(
                doc! { "_id": comment.blog },
                doc! { "$push": { "comments": comment.id } },
            ),
            session
        );
        match linked {
            Ok(res) if res.matched_count == 0 => {
                tracing::warn!(comment_id = %comment.id, blog_id = %comment.blog, "comment_parent_missing");
            }
            Ok(_) => {}
            Err(e) => {
                if !self.store.transactional() {
                    tracing::warn!(comment_id = %comment.id, blog_id = %comment.blog, error = ?e, "comment_link_failed_after_insert");
                }
                return Err(e).context("link comment to blog");
            }
        }

        self.store.commit(session).await
    }

    async fn update_content(&self, id: ObjectId, content: &str) -> anyhow::Result<bool> {
        let res = self
            .store
            .comments
            .update_one(doc! { "_id": id }, doc! { "$set": { "content": content } })
            .await?;
        Ok(res.matched_count > 0)
    }

    async fn delete_from_blog(&self, comment: &Comment) -> anyhow::Result<bool> {
        let mut session = self.store.begin().await?;

        let deleted = in_session!(self.store.comments.delete_one(doc! { "_id": comment.id }), session)
            .context("delete comment")?;
        if deleted.deleted_count == 0 {
            return Ok(false);
        }

        let unlinked = in_session!(
            self.store.blogs.update_one(
                doc! { "_id": comment.blog, "comments": comment.id },
                doc! { "$pull": { "comments": comment.id } },
            ),
            session
        );
        let unlinked = match unlinked {
            Ok(res) if res.matched_count > 0 => Ok(()),
            Ok(_) => {
                tracing::info!(comment_id = %comment.id, blog_id = %comment.blog, "comment_parent_reference_stale");
                in_session!(
                    self.store.blogs.update_one(
                        doc! { "comments": comment.id },
                        doc! { "$pull": { "comments": comment.id } },
                    ),
                    session
                )
                .map(|_| ())
            }
            Err(e) => Err(e),
        };
        if let Err(e) = unlinked {
            if !self.store.transactional() {
                tracing::warn!(comment_id = %comment.id, blog_id = %comment.blog, error = ?e, "comment_unlink_failed_after_delete");
            }
            return Err(e).context("unlink comment from blog");
        }

        self.store.commit(session).await?;
        Ok(true)
    }
}
