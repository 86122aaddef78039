//! Blog post form

use brevity_core::Post;
use serde::Deserialize;
use validator::Validate;

use super::FormErrors;

/// Create/update post form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostForm {
    #[validate(length(max = 100, message = "Field cannot be longer than 100 characters."))]
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub content: String,
}

impl PostForm {
    /// Pre-fill from an existing post
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
        }
    }

    /// Run every field rule
    ///
    /// # Errors
    /// Returns the failing fields with their messages
    pub fn validate_form(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::from_validation(self.validate());
        errors.require("title", &self.title);
        errors.require("content", &self.content);
        errors.into_result()
    }
}
