//! Account update form

use brevity_core::User;
use serde::Deserialize;
use validator::Validate;

use super::FormErrors;
use crate::services::{AvatarStore, PictureUpload};

/// Profile form; the picture arrives separately as a multipart file part
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAccountForm {
    #[validate(length(min = 2, max = 20, message = "Field must be between 2 and 20 characters long."))]
    #[serde(default)]
    pub username: String,

    #[validate(
        email(message = "Invalid email address."),
        length(max = 120, message = "Field cannot be longer than 120 characters.")
    )]
    #[serde(default)]
    pub email: String,
}

impl UpdateAccountForm {
    /// Pre-fill with the user's current values
    pub fn for_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }

    /// Run every field rule, including the picture's extension
    ///
    /// # Errors
    /// Returns the failing fields with their messages
    pub fn validate_form(&self, picture: Option<&PictureUpload>) -> Result<(), FormErrors> {
        let mut errors = FormErrors::from_validation(self.validate());
        errors.require("username", &self.username);
        errors.require("email", &self.email);

        if let Some(picture) = picture {
            if AvatarStore::extension_of(&picture.filename).is_none() {
                errors.add("picture", AvatarStore::EXTENSION_MESSAGE);
            }
        }

        errors.into_result()
    }
}
