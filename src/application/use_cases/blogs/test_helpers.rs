use crate::application::access::AuthUser;
use crate::application::ports::blog_repository::BlogRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::blogs::blog::{Blog, BlogContent, MIN_ARTICLE_CHARS};
use crate::domain::users::user::NewUser;
use crate::infrastructure::db::memory::MemoryStore;

pub(crate) fn content(article_len: usize) -> BlogContent {
    BlogContent {
        title: "On engines".into(),
        description: "Notes on the analytical engine".into(),
        article: "x".repeat(article_len),
    }
}

pub(crate) async fn seed_user(store: &MemoryStore, email: &str) -> AuthUser {
    let user = store
        .insert(NewUser {
            first_name: "First".into(),
            last_name: email.into(),
            email: email.into(),
            password_hash: "unused".into(),
        })
        .await
        .unwrap();
    AuthUser::from(&user)
}

pub(crate) async fn seed_blog(store: &MemoryStore, author: &AuthUser) -> Blog {
    let blog = Blog::new(author.user_id, content(MIN_ARTICLE_CHARS));
    store.create_for_author(&blog).await.unwrap();
    blog
}
