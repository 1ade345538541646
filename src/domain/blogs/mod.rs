pub mod blog;
pub mod comment;
