use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;

use crate::application::error::ServiceError;
use crate::application::ports::blog_repository::BlogRepository;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::blogs::list_all_blogs::author_names;
use crate::domain::blogs::blog::BlogDetail;
use crate::domain::blogs::comment::{Comment, CommentView};
use crate::domain::users::user::AuthorName;

pub struct GetBlog<'a, B, C, U>
where
    B: BlogRepository + ?Sized,
    C: CommentRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub blogs: &'a B,
    pub comments: &'a C,
    pub users: &'a U,
}

impl<'a, B, C, U> GetBlog<'a, B, C, U>
where
    B: BlogRepository + ?Sized,
    C: CommentRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    /// Only the blog lookup itself is fatal. A failed or missing author or
    /// commenter lookup yields blank names. A failed comment batch lookup
    /// yields an empty comment list, and dangling comment ids are skipped.
    pub async fn execute(&self, blog_id: ObjectId) -> Result<BlogDetail, ServiceError> {
        let blog = self
            .blogs
            .find_by_id(blog_id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        let author = match self.users.find_by_id(blog.author).await {
            Ok(Some(user)) => AuthorName::from(&user),
            Ok(None) => AuthorName::default(),
            Err(e) => {
                tracing::warn!(blog_id = %blog_id, error = ?e, "blog_author_lookup_failed");
                AuthorName::default()
            }
        };

        let comments = if blog.comments.is_empty() {
            Vec::new()
        } else {
            match self.comments.find_many(&blog.comments).await {
                Ok(found) => self.ordered_views(&blog.comments, found).await,
                Err(e) => {
                    tracing::warn!(blog_id = %blog_id, error = ?e, "blog_comments_lookup_failed");
                    Vec::new()
                }
            }
        };

        Ok(BlogDetail {
            summary: blog.summarize(author),
            comments,
        })
    }

    // Keeps the order of the blog's `comments` list; ids that no longer
    // resolve are skipped.
    async fn ordered_views(&self, order: &[ObjectId], found: Vec<Comment>) -> Vec<CommentView> {
        let mut user_ids: Vec<ObjectId> = found.iter().map(|c| c.user).collect();
        user_ids.sort();
        user_ids.dedup();
        let names = author_names(self.users, &user_ids).await.unwrap_or_else(|e| {
            tracing::warn!(error = ?e, "commenter_lookup_failed");
            HashMap::new()
        });

        let mut by_id: HashMap<ObjectId, Comment> = found.into_iter().map(|c| (c.id, c)).collect();
        order
            .iter()
            .filter_map(|id| by_id.remove(id))
            .map(|c| CommentView {
                id: c.id,
                user: names.get(&c.user).cloned().unwrap_or_default(),
                content: c.content,
                date: c.date,
            })
            .collect()
    }
}
