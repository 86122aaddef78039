//! In-memory repositories and fixtures shared by the service tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use brevity_common::SessionTokens;
use brevity_core::{
    DomainError, NewPost, NewUser, Post, PostId, PostRepository, PostWithAuthor, RepoResult, User,
    UserId, UserRepository, DEFAULT_IMAGE_FILE,
};
use brevity_service::{
    AuthService, AvatarStore, Identity, LoginForm, RegistrationForm, ServiceContext,
    ServiceContextBuilder,
};

/// Widths of the `"user"` columns in the migration
const USERNAME_WIDTH: usize = 20;
const EMAIL_WIDTH: usize = 120;
const IMAGE_FILE_WIDTH: usize = 20;

/// Users (with their password hashes) and posts kept in insertion order
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<(User, String)>>,
    posts: Mutex<Vec<Post>>,
    fail_user_updates: AtomicBool,
}

/// Reject values Postgres would refuse with "value too long"
fn check_widths(username: &str, email: &str, image_file: &str) -> RepoResult<()> {
    for (column, value, width) in [
        ("username", username, USERNAME_WIDTH),
        ("email", email, EMAIL_WIDTH),
        ("image_file", image_file, IMAGE_FILE_WIDTH),
    ] {
        if value.chars().count() > width {
            return Err(DomainError::DatabaseError(format!(
                "value too long for type character varying({width}) in column {column}"
            )));
        }
    }
    Ok(())
}

impl MemoryStore {
    /// Make every later user update fail as a database error
    pub fn fail_user_updates(&self) {
        self.fail_user_updates.store(true, Ordering::SeqCst);
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn post(&self, id: PostId) -> Option<Post> {
        self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    pub fn user(&self, id: UserId) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone())
    }

    fn author_of(&self, post: &Post) -> RepoResult<User> {
        self.user(post.author_id)
            .ok_or(DomainError::UserNotFound(post.author_id))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|(u, _)| u.email == email).map(|(u, _)| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|(u, _)| u.username == username)
            .map(|(u, _)| u.clone()))
    }

    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        check_widths(&user.username, &user.email, DEFAULT_IMAGE_FILE)?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|(u, _)| u.username == user.username) {
            return Err(DomainError::UsernameTaken);
        }
        if users.iter().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailTaken);
        }

        let created = User {
            id: UserId::new(users.len() as i64 + 1),
            username: user.username.clone(),
            email: user.email.clone(),
            image_file: DEFAULT_IMAGE_FILE.to_string(),
        };
        users.push((created.clone(), user.password_hash.clone()));
        Ok(created)
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        if self.fail_user_updates.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        check_widths(&user.username, &user.email, &user.image_file)?;
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|(u, _)| u.id != user.id && (u.username == user.username || u.email == user.email))
        {
            return Err(DomainError::UsernameTaken);
        }
        let slot = users
            .iter_mut()
            .find(|(u, _)| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        slot.0 = user.clone();
        Ok(())
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone()))
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        Ok(self.post(id))
    }

    async fn find_with_author(&self, id: PostId) -> RepoResult<Option<PostWithAuthor>> {
        match self.post(id) {
            Some(post) => {
                let author = self.author_of(&post)?;
                Ok(Some(PostWithAuthor { post, author }))
            }
            None => Ok(None),
        }
    }

    async fn list_with_authors(&self) -> RepoResult<Vec<PostWithAuthor>> {
        let posts = self.posts.lock().unwrap().clone();
        posts
            .into_iter()
            .map(|post| {
                let author = self.author_of(&post)?;
                Ok(PostWithAuthor { post, author })
            })
            .collect()
    }

    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let mut posts = self.posts.lock().unwrap();
        let next_id = posts.iter().map(|p| p.id.into_inner()).max().unwrap_or(0) + 1;
        let created = Post {
            id: PostId::new(next_id),
            title: post.title.clone(),
            content: post.content.clone(),
            created_at: Utc::now(),
            author_id: post.author_id,
        };
        posts.push(created.clone());
        Ok(created)
    }

    async fn update(&self, post: &Post) -> RepoResult<()> {
        let mut posts = self.posts.lock().unwrap();
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(DomainError::PostNotFound(post.id))?;
        *slot = post.clone();
        Ok(())
    }

    async fn delete(&self, id: PostId) -> RepoResult<()> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(DomainError::PostNotFound(id));
        }
        Ok(())
    }
}

/// A service context over a fresh in-memory store, with avatars under `avatar_dir`
pub fn context(avatar_dir: &Path) -> (ServiceContext, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let ctx = ServiceContextBuilder::new()
        .user_repo(store.clone())
        .post_repo(store.clone())
        .session_tokens(Arc::new(SessionTokens::new("service-test-secret", 744, 365)))
        .avatars(Arc::new(AvatarStore::new(avatar_dir)))
        .build()
        .unwrap();
    (ctx, store)
}

pub fn registration(username: &str, email: &str, password: &str) -> RegistrationForm {
    RegistrationForm {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        confirm_password: password.to_string(),
    }
}

pub fn login(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.to_string(),
        password: password.to_string(),
        remember: false,
    }
}

/// Register and log in, returning the identity a request would carry
pub async fn signed_in(ctx: &ServiceContext, username: &str, email: &str) -> Identity {
    let auth = AuthService::new(ctx);
    auth.register(registration(username, email, "secret1"))
        .await
        .unwrap();
    let user = auth.login(&login(email, "secret1")).await.unwrap();
    Identity::new(user)
}
