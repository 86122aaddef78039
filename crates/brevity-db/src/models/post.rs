//! Post database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the `post` table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub title: String,
    pub date_posted: DateTime<Utc>,
    pub content: String,
    pub user_id: i64,
}

/// A `post` row joined with its author's `"user"` row
///
/// Author columns are aliased with an `author_` prefix in the query.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthorModel {
    #[sqlx(flatten)]
    pub post: PostModel,
    pub author_username: String,
    pub author_email: String,
    pub author_image_file: String,
}
