//! Error handling utilities for repositories

use brevity_core::{DomainError, PostId, UserId};
use sqlx::Error as SqlxError;

/// Unique constraints on the `"user"` table, as named in the migrations
const USERNAME_CONSTRAINT: &str = "user_username_key";
const EMAIL_CONSTRAINT: &str = "user_email_key";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique violation on `"user"` to the field it concerns
///
/// Any other error falls back to a database error.
pub fn map_user_unique_violation(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some(USERNAME_CONSTRAINT) => DomainError::UsernameTaken,
                Some(EMAIL_CONSTRAINT) => DomainError::EmailTaken,
                other => DomainError::DatabaseError(format!(
                    "Unexpected unique violation on {}",
                    other.unwrap_or("unknown constraint")
                )),
            };
        }
    }
    map_db_error(e)
}

/// Create a "user not found" error
pub fn user_not_found(id: UserId) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "post not found" error
pub fn post_not_found(id: PostId) -> DomainError {
    DomainError::PostNotFound(id)
}
