//! User entity - a registered blog author

use crate::value_objects::UserId;

/// Placeholder avatar assigned to every new account
pub const DEFAULT_IMAGE_FILE: &str = "default.jpg";

/// User entity
///
/// The password hash is deliberately absent; it is only ever read through
/// [`crate::traits::UserRepository::get_password_hash`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub image_file: String,
}

impl User {
    /// Public URL path of the user's avatar
    pub fn image_url(&self) -> String {
        format!("/static/profile_pics/{}", self.image_file)
    }

    /// Whether the user still has the placeholder avatar
    #[inline]
    pub fn has_default_image(&self) -> bool {
        self.image_file == DEFAULT_IMAGE_FILE
    }

    pub fn set_username(&mut self, username: String) {
        self.username = username;
    }

    pub fn set_email(&mut self, email: String) {
        self.email = email;
    }

    pub fn set_image_file(&mut self, image_file: String) {
        self.image_file = image_file;
    }
}

/// Values needed to insert a user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
