use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;

use crate::application::error::ServiceError;
use crate::application::ports::blog_repository::BlogRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::blogs::blog::BlogSummary;
use crate::domain::users::user::AuthorName;

pub struct ListAllBlogs<'a, B, U>
where
    B: BlogRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub blogs: &'a B,
    pub users: &'a U,
}

impl<'a, B, U> ListAllBlogs<'a, B, U>
where
    B: BlogRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    /// Every blog with its author's name joined in. Each call is a fresh query.
    pub async fn execute(&self) -> Result<Vec<BlogSummary>, ServiceError> {
        let blogs = self.blogs.list_all().await?;
        let mut author_ids: Vec<ObjectId> = blogs.iter().map(|b| b.author).collect();
        author_ids.sort();
        author_ids.dedup();
        let names = author_names(self.users, &author_ids).await?;

        Ok(blogs
            .iter()
            .map(|b| b.summarize(names.get(&b.author).cloned().unwrap_or_default()))
            .collect())
    }
}

pub(crate) async fn author_names<U: UserRepository + ?Sized>(
    users: &U,
    ids: &[ObjectId],
) -> anyhow::Result<HashMap<ObjectId, AuthorName>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let found = users.find_many(ids).await?;
    Ok(found.iter().map(|u| (u.id, AuthorName::from(u))).collect())
}
