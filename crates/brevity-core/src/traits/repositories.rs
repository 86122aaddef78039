//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{NewPost, NewUser, Post, PostWithAuthor, User};
use crate::error::DomainError;
use crate::value_objects::{PostId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Insert a new user.
    ///
    /// Fails with `UsernameTaken` or `EmailTaken` when a unique constraint is hit.
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Persist username, email and image file of an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>>;

    /// Find post by ID together with its author
    async fn find_with_author(&self, id: PostId) -> RepoResult<Option<PostWithAuthor>>;

    /// All posts with their authors, oldest first
    async fn list_with_authors(&self) -> RepoResult<Vec<PostWithAuthor>>;

    /// Insert a new post
    async fn create(&self, post: &NewPost) -> RepoResult<Post>;

    /// Persist title and content of an existing post
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post
    async fn delete(&self, id: PostId) -> RepoResult<()>;
}
