pub mod create_blog;
pub mod delete_blog;
pub mod get_blog;
pub mod list_all_blogs;
pub mod list_user_blogs;
pub mod update_blog;

#[cfg(test)]
pub(crate) mod test_helpers;
