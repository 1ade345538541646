use anyhow::Context;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;

use crate::application::ports::blog_repository::BlogRepository;
use crate::domain::blogs::blog::{Blog, BlogContent};
use crate::infrastructure::db::documents::BlogDocument;
use crate::infrastructure::db::{MongoStore, in_session};

pub struct MongoBlogRepository {
    pub store: MongoStore,
}

impl MongoBlogRepository {
    pub fn new(store: MongoStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BlogRepository for MongoBlogRepository {
    async fn list_all(&self) -> anyhow::Result<Vec<Blog>> {
        let cursor = self.store.blogs.find(doc! {}).await?;
        let docs: Vec<BlogDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Blog::from).collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Blog>> {
        let found = self.store.blogs.find_one(doc! { "_id": id }).await?;
        Ok(found.map(Blog::from))
    }

    async fn list_by_author(&self, author: ObjectId) -> anyhow::Result<Vec<Blog>> {
        let cursor = self.store.blogs.find(doc! { "author": author }).await?;
        let docs: Vec<BlogDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Blog::from).collect())
    }

    async fn create_for_author(&self, blog: &Blog) -> anyhow::Result<()> {
        let record = BlogDocument::from(blog);
        let mut session = self.store.begin().await?;

        in_session!(self.store.blogs.insert_one(&record), session).context("insert blog")?;

        let linked = in_session!(
            self.store.users.update_one(
                doc! { "_id": blog.author },
                doc! { "$push": { "blogs": blog.id } },
            ),
            session
        );
        match linked {
            Ok(res) if res.matched_count == 0 => {
                tracing::warn!(blog_id = %blog.id, author_id = %blog.author, "blog_author_missing");
            }
            Ok(_) => {}
            Err(e) => {
                if !self.store.transactional() {
                    tracing::warn!(blog_id = %blog.id, author_id = %blog.author, error = ?e, "blog_author_link_failed_after_insert");
                }
                return Err(e).context("link blog to author");
            }
        }

        self.store.commit(session).await
    }

    async fn update_content(
        &self,
        id: ObjectId,
        content: &BlogContent,
    ) -> anyhow::Result<Option<Blog>> {
        let updated = self
            .store
            .blogs
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": {
                    "title": &content.title,
                    "description": &content.description,
                    "article": &content.article,
                } },
            )
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated.map(Blog::from))
    }

    async fn delete_for_author(&self, id: ObjectId, author: ObjectId) -> anyhow::Result<bool> {
        let mut session = self.store.begin().await?;

        let deleted =
            in_session!(self.store.blogs.delete_one(doc! { "_id": id }), session).context("delete blog")?;
        if deleted.deleted_count == 0 {
            return Ok(false);
        }

        let unlinked = in_session!(
            self.store.users.update_one(
                doc! { "_id": author },
                doc! { "$pull": { "blogs": id } },
            ),
            session
        );
        if let Err(e) = unlinked {
            if !self.store.transactional() {
                tracing::warn!(blog_id = %id, author_id = %author, error = ?e, "blog_author_unlink_failed_after_delete");
            }
            return Err(e).context("unlink blog from author");
        }

        self.store.commit(session).await?;
        Ok(true)
    }
}
