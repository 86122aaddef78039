//! Post entity <-> model mapper

use brevity_core::{NewPost, Post, PostId, PostWithAuthor, User, UserId};

use crate::models::{PostModel, PostWithAuthorModel};

/// Convert PostModel to Post entity
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: PostId::new(model.id),
            title: model.title,
            content: model.content,
            created_at: model.date_posted,
            author_id: UserId::new(model.user_id),
        }
    }
}

/// Split a joined row into the post and its author
impl From<PostWithAuthorModel> for PostWithAuthor {
    fn from(model: PostWithAuthorModel) -> Self {
        let author = User {
            id: UserId::new(model.post.user_id),
            username: model.author_username,
            email: model.author_email,
            image_file: model.author_image_file,
        };

        PostWithAuthor {
            post: Post::from(model.post),
            author,
        }
    }
}

/// Values bound when inserting a post row
pub struct PostInsert<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub user_id: i64,
}

impl<'a> PostInsert<'a> {
    pub fn new(post: &'a NewPost) -> Self {
        Self {
            title: &post.title,
            content: &post.content,
            user_id: post.author_id.into_inner(),
        }
    }
}

/// Values bound when editing a post
pub struct PostUpdate<'a> {
    pub id: i64,
    pub title: &'a str,
    pub content: &'a str,
}

impl<'a> PostUpdate<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            id: post.id.into_inner(),
            title: &post.title,
            content: &post.content,
        }
    }
}
