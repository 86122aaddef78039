//! Domain entities - core business objects

mod post;
mod user;

pub use post::{NewPost, Post, PostWithAuthor};
pub use user::{NewUser, User, DEFAULT_IMAGE_FILE};
