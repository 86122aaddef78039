//! Authentication service
//!
//! Handles registration, login, and resolving the session cookie back into
//! an [`Identity`].

use brevity_common::AppError;
use brevity_core::{DomainError, NewUser, User};
use tracing::{debug, info, instrument, warn};

use crate::forms::{FormErrors, LoginForm, RegistrationForm};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::identity::Identity;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, form), fields(username = %form.username, email = %form.email))]
    pub async fn register(&self, form: RegistrationForm) -> ServiceResult<User> {
        form.validate_form()?;

        let mut errors = FormErrors::new();
        if self
            .ctx
            .user_repo()
            .find_by_username(&form.username)
            .await?
            .is_some()
        {
            errors.add("username", DomainError::UsernameTaken.to_string());
        }
        if self.ctx.user_repo().find_by_email(&form.email).await?.is_some() {
            errors.add("email", DomainError::EmailTaken.to_string());
        }
        errors.into_result()?;

        let password_hash = self.ctx.passwords().hash(&form.password)?;

        // The unique constraints still decide if a concurrent sign-up wins the race
        let user = self
            .ctx
            .user_repo()
            .create(&NewUser {
                username: form.username,
                email: form.email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered successfully");
        Ok(user)
    }

    /// Check email and password
    ///
    /// An unknown email and a wrong password fail with the same
    /// `AppError::InvalidCredentials`, after the same amount of hashing.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn login(&self, form: &LoginForm) -> ServiceResult<User> {
        form.validate_form()?;

        let Some(user) = self.ctx.user_repo().find_by_email(&form.email).await? else {
            self.ctx.passwords().verify_unknown_account(&form.password);
            warn!("Login failed: user not found");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        };

        let Some(password_hash) = self.ctx.user_repo().get_password_hash(user.id).await? else {
            self.ctx.passwords().verify_unknown_account(&form.password);
            warn!(user_id = %user.id, "Login failed: no password hash");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        };

        if let Err(e) = self.ctx.passwords().verify_or_error(&form.password, &password_hash) {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        info!(user_id = %user.id, "User logged in successfully");
        Ok(user)
    }

    /// Issue the session cookie value for a logged-in user
    pub fn issue_session(&self, user: &User, remember: bool) -> ServiceResult<String> {
        Ok(self.ctx.session_tokens().issue(user.id, remember)?)
    }

    /// Resolve a session cookie value into the acting user
    ///
    /// Invalid or expired tokens, and tokens for users that no longer exist,
    /// resolve to `None`.
    #[instrument(skip(self, token))]
    pub async fn resolve_identity(&self, token: &str) -> ServiceResult<Option<Identity>> {
        let user_id = match self.ctx.session_tokens().user_id(token) {
            Ok(id) => id,
            Err(e) => {
                debug!(error = %e, "Ignoring session cookie");
                return Ok(None);
            }
        };

        let user = self.ctx.user_repo().find_by_id(user_id).await?;
        if user.is_none() {
            debug!(user_id = %user_id, "Session refers to an unknown user");
        }
        Ok(user.map(Identity::new))
    }
}
