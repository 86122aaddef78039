//! User entity <-> model mapper

use brevity_core::{NewUser, User, UserId};

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            username: model.username,
            email: model.email,
            image_file: model.image_file,
        }
    }
}

/// Values bound when inserting a user row
pub struct UserInsert<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a NewUser) -> Self {
        Self {
            username: &user.username,
            email: &user.email,
            password_hash: &user.password_hash,
        }
    }
}

/// Values bound when updating a user's profile
pub struct UserUpdate<'a> {
    pub id: i64,
    pub username: &'a str,
    pub email: &'a str,
    pub image_file: &'a str,
}

impl<'a> UserUpdate<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: &user.username,
            email: &user.email,
            image_file: &user.image_file,
        }
    }
}
