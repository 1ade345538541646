pub mod blog_repository_mongo;
pub mod comment_repository_mongo;
pub mod user_repository_mongo;
