pub mod delete_comment;
pub mod make_comment;
pub mod update_comment;
