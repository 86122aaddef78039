//! User database model

use sqlx::FromRow;

/// Database model for the `"user"` table, without the password column
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub image_file: String,
}
