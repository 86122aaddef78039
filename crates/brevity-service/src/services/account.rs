//! Account service
//!
//! Profile updates: username, email, and profile picture.

use brevity_core::{DomainError, User};
use tracing::{error, info, instrument};

use crate::forms::{FormErrors, UpdateAccountForm};

use super::avatar::PictureUpload;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::identity::Identity;

/// Account service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    /// Create a new AccountService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply the account form for `identity`, storing `picture` if one was sent
    #[instrument(skip(self, identity, form, picture), fields(user_id = %identity.id()))]
    pub async fn update(
        &self,
        identity: &Identity,
        form: UpdateAccountForm,
        picture: Option<PictureUpload>,
    ) -> ServiceResult<User> {
        form.validate_form(picture.as_ref())?;

        let current = identity.user();
        let mut errors = FormErrors::new();

        // Keeping your own username or email is not a conflict
        if form.username != current.username
            && self
                .ctx
                .user_repo()
                .find_by_username(&form.username)
                .await?
                .is_some()
        {
            errors.add("username", DomainError::UsernameTaken.to_string());
        }
        if form.email != current.email
            && self
                .ctx
                .user_repo()
                .find_by_email(&form.email)
                .await?
                .is_some()
        {
            errors.add("email", DomainError::EmailTaken.to_string());
        }
        errors.into_result()?;

        let mut user = current.clone();
        let previous_image = user.image_file.clone();

        let mut stored_picture = None;
        if let Some(picture) = picture {
            let stored = self.ctx.avatars().save(picture).await?;
            user.set_image_file(stored.clone());
            stored_picture = Some(stored);
        }
        user.set_username(form.username);
        user.set_email(form.email);

        if let Err(e) = self.ctx.user_repo().update(&user).await {
            // The row still points at the previous picture
            if let Some(stored) = stored_picture {
                if let Err(cleanup) = self.ctx.avatars().remove(&stored).await {
                    error!(error = %cleanup, file = %stored, "Failed to remove unused profile picture");
                }
            }
            return Err(e.into());
        }

        // The row already points at the new picture, so a failed cleanup only leaks a file
        if user.image_file != previous_image {
            if let Err(e) = self.ctx.avatars().remove(&previous_image).await {
                error!(error = %e, file = %previous_image, "Failed to remove old profile picture");
            }
        }

        info!("Account updated");
        Ok(user)
    }
}
