pub mod blog_repository;
pub mod comment_repository;
pub mod health_port;
pub mod user_repository;
