//! Service context - dependency container for services
//!
//! Holds the repositories, session token issuer, and avatar store the
//! services need.

use std::sync::Arc;

use brevity_common::{PasswordService, SessionTokens};
use brevity_core::{PostRepository, UserRepository};

use super::avatar::AvatarStore;
use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,

    // Services
    passwords: PasswordService,
    session_tokens: Arc<SessionTokens>,
    avatars: Arc<AvatarStore>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        session_tokens: Arc<SessionTokens>,
        avatars: Arc<AvatarStore>,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            passwords: PasswordService::new(),
            session_tokens,
            avatars,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    // === Services ===

    pub fn passwords(&self) -> &PasswordService {
        &self.passwords
    }

    /// Get the session token issuer
    pub fn session_tokens(&self) -> &SessionTokens {
        self.session_tokens.as_ref()
    }

    /// Get the avatar store
    pub fn avatars(&self) -> &AvatarStore {
        self.avatars.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("session_tokens", &self.session_tokens)
            .field("avatars", &self.avatars)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    session_tokens: Option<Arc<SessionTokens>>,
    avatars: Option<Arc<AvatarStore>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn session_tokens(mut self, tokens: Arc<SessionTokens>) -> Self {
        self.session_tokens = Some(tokens);
        self
    }

    pub fn avatars(mut self, store: Arc<AvatarStore>) -> Self {
        self.avatars = Some(store);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::internal("user_repo is required"))?,
            self.post_repo
                .ok_or_else(|| ServiceError::internal("post_repo is required"))?,
            self.session_tokens
                .ok_or_else(|| ServiceError::internal("session_tokens is required"))?,
            self.avatars
                .ok_or_else(|| ServiceError::internal("avatars is required"))?,
        ))
    }
}
