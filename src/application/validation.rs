use once_cell::sync::Lazy;
use regex::Regex;

use crate::application::error::ServiceError;
use crate::domain::blogs::blog::{BlogContent, MIN_ARTICLE_CHARS};

pub const MIN_PASSWORD_CHARS: usize = 8;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+([\.-]?\w+)*@\w+([\.-]?\w+)*(\.\w{2,3})+$").expect("valid regex")
});

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn require_non_empty(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub fn require_min_chars(field: &str, value: &str, min: usize) -> Result<(), ServiceError> {
    if value.chars().count() < min {
        return Err(ServiceError::validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    Ok(())
}

pub fn validate_blog_content(content: &BlogContent) -> Result<(), ServiceError> {
    require_non_empty("title", &content.title)?;
    require_non_empty("description", &content.description)?;
    require_min_chars("article", &content.article, MIN_ARTICLE_CHARS)
}
