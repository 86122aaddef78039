//! Post service
//!
//! Listing, reading, and author-only editing of blog posts.

use brevity_core::{DomainError, NewPost, Post, PostId, PostWithAuthor};
use tracing::{info, instrument, warn};

use crate::forms::PostForm;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::identity::Identity;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All posts with their authors, oldest first
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<PostWithAuthor>> {
        Ok(self.ctx.post_repo().list_with_authors().await?)
    }

    /// One post with its author
    #[instrument(skip(self))]
    pub async fn read(&self, post_id: PostId) -> ServiceResult<PostWithAuthor> {
        self.ctx
            .post_repo()
            .find_with_author(post_id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    /// Publish a post authored by `identity`
    #[instrument(skip(self, identity, form), fields(author_id = %identity.id()))]
    pub async fn create(&self, identity: &Identity, form: PostForm) -> ServiceResult<Post> {
        form.validate_form()?;

        let post = self
            .ctx
            .post_repo()
            .create(&NewPost {
                title: form.title,
                content: form.content,
                author_id: identity.id(),
            })
            .await?;

        info!(post_id = %post.id, "Post created");
        Ok(post)
    }

    /// Load a post that `identity` is allowed to change
    ///
    /// # Errors
    /// `PostNotFound` when absent, `NotPostAuthor` for anyone but the author
    #[instrument(skip(self, identity), fields(user_id = %identity.id()))]
    pub async fn find_owned(&self, identity: &Identity, post_id: PostId) -> ServiceResult<Post> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        if !post.is_authored_by(identity.id()) {
            warn!(author_id = %post.author_id, "Rejected change by non-author");
            return Err(DomainError::NotPostAuthor(post_id).into());
        }

        Ok(post)
    }

    /// Replace title and content
    #[instrument(skip(self, identity, form), fields(user_id = %identity.id()))]
    pub async fn update(
        &self,
        identity: &Identity,
        post_id: PostId,
        form: PostForm,
    ) -> ServiceResult<Post> {
        let mut post = self.find_owned(identity, post_id).await?;
        form.validate_form()?;

        post.edit(form.title, form.content);
        self.ctx.post_repo().update(&post).await?;

        info!("Post updated");
        Ok(post)
    }

    /// Delete a post
    #[instrument(skip(self, identity), fields(user_id = %identity.id()))]
    pub async fn delete(&self, identity: &Identity, post_id: PostId) -> ServiceResult<()> {
        let post = self.find_owned(identity, post_id).await?;
        self.ctx.post_repo().delete(post.id).await?;

        info!("Post deleted");
        Ok(())
    }
}
