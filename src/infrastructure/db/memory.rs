//! In-process store backing the use-case and HTTP tests. Mirrors the
//! cascade semantics of the Mongo repositories.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::Mutex;

use crate::application::ports::blog_repository::BlogRepository;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::health_port::HealthPort;
use crate::application::ports::user_repository::{InsertUserError, UserRepository};
use crate::domain::blogs::blog::{Blog, BlogContent};
use crate::domain::blogs::comment::Comment;
use crate::domain::users::user::{NewUser, User};

#[derive(Default)]
struct State {
    users: Vec<User>,
    blogs: Vec<Blog>,
    comments: Vec<Comment>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Makes every repository call fail as if the database were down.
    pub fn set_unavailable(&self, down: bool) {
        self.unavailable.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            anyhow::bail!("memory store is unavailable");
        }
        Ok(())
    }

    pub async fn user(&self, id: ObjectId) -> Option<User> {
        self.state.lock().await.users.iter().find(|u| u.id == id).cloned()
    }

    pub async fn blog(&self, id: ObjectId) -> Option<Blog> {
        self.state.lock().await.blogs.iter().find(|b| b.id == id).cloned()
    }

    pub async fn comment(&self, id: ObjectId) -> Option<Comment> {
        self.state.lock().await.comments.iter().find(|c| c.id == id).cloned()
    }

    pub async fn user_count(&self) -> usize {
        self.state.lock().await.users.len()
    }

    pub async fn blog_count(&self) -> usize {
        self.state.lock().await.blogs.len()
    }

    pub async fn comment_count(&self) -> usize {
        self.state.lock().await.comments.len()
    }

    /// Inserts a blog without touching its author's `blogs` list.
    pub async fn put_blog(&self, blog: Blog) {
        self.state.lock().await.blogs.push(blog);
    }

    /// Rewrites a comment's stored parent without touching any blog.
    pub async fn repoint_comment(&self, comment_id: ObjectId, blog_id: ObjectId) {
        let mut state = self.state.lock().await;
        if let Some(c) = state.comments.iter_mut().find(|c| c.id == comment_id) {
            c.blog = blog_id;
        }
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, InsertUserError> {
        self.check().map_err(InsertUserError::Storage)?;
        let mut state = self.state.lock().await;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(InsertUserError::DuplicateEmail);
        }
        let created = User {
            id: ObjectId::new(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            blogs: Vec::new(),
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        self.check()?;
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<User>> {
        self.check()?;
        Ok(self.user(id).await)
    }

    async fn find_many(&self, ids: &[ObjectId]) -> anyhow::Result<Vec<User>> {
        self.check()?;
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BlogRepository for MemoryStore {
    async fn list_all(&self) -> anyhow::Result<Vec<Blog>> {
        self.check()?;
        Ok(self.state.lock().await.blogs.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Blog>> {
        self.check()?;
        Ok(self.blog(id).await)
    }

    async fn list_by_author(&self, author: ObjectId) -> anyhow::Result<Vec<Blog>> {
        self.check()?;
        let state = self.state.lock().await;
        Ok(state
            .blogs
            .iter()
            .filter(|b| b.author == author)
            .cloned()
            .collect())
    }

    async fn create_for_author(&self, blog: &Blog) -> anyhow::Result<()> {
        self.check()?;
        let mut state = self.state.lock().await;
        state.blogs.push(blog.clone());
        if let Some(u) = state.users.iter_mut().find(|u| u.id == blog.author) {
            u.blogs.push(blog.id);
        }
        Ok(())
    }

    async fn update_content(
        &self,
        id: ObjectId,
        content: &BlogContent,
    ) -> anyhow::Result<Option<Blog>> {
        self.check()?;
        let mut state = self.state.lock().await;
        let Some(b) = state.blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        b.title = content.title.clone();
        b.description = content.description.clone();
        b.article = content.article.clone();
        Ok(Some(b.clone()))
    }

    async fn delete_for_author(&self, id: ObjectId, author: ObjectId) -> anyhow::Result<bool> {
        self.check()?;
        let mut state = self.state.lock().await;
        let before = state.blogs.len();
        state.blogs.retain(|b| b.id != id);
        if state.blogs.len() == before {
            return Ok(false);
        }
        if let Some(u) = state.users.iter_mut().find(|u| u.id == author) {
            u.blogs.retain(|b| *b != id);
        }
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Comment>> {
        self.check()?;
        Ok(self.comment(id).await)
    }

    async fn find_many(&self, ids: &[ObjectId]) -> anyhow::Result<Vec<Comment>> {
        self.check()?;
        let state = self.state.lock().await;
        Ok(state
            .comments
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn create_on_blog(&self, comment: &Comment) -> anyhow::Result<()> {
        self.check()?;
        let mut state = self.state.lock().await;
        state.comments.push(comment.clone());
        if let Some(b) = state.blogs.iter_mut().find(|b| b.id == comment.blog) {
            b.comments.push(comment.id);
        }
        Ok(())
    }

    async fn update_content(&self, id: ObjectId, content: &str) -> anyhow::Result<bool> {
        self.check()?;
        let mut state = self.state.lock().await;
        match state.comments.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                c.content = content.to_owned();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_from_blog(&self, comment: &Comment) -> anyhow::Result<bool> {
        self.check()?;
        let mut state = self.state.lock().await;
        let before = state.comments.len();
        state.comments.retain(|c| c.id != comment.id);
        if state.comments.len() == before {
            return Ok(false);
        }
        let parent = state
            .blogs
            .iter()
            .position(|b| b.id == comment.blog && b.comments.contains(&comment.id))
            .or_else(|| {
                state
                    .blogs
                    .iter()
                    .position(|b| b.comments.contains(&comment.id))
            });
        if let Some(i) = parent {
            state.blogs[i].comments.retain(|c| *c != comment.id);
        }
        Ok(true)
    }
}

#[async_trait]
impl HealthPort for MemoryStore {
    async fn ping(&self) -> anyhow::Result<()> {
        self.check()
    }
}
