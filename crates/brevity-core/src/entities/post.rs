//! Post entity - a blog post owned by exactly one user

use chrono::{DateTime, Utc};

use super::User;
use crate::value_objects::{PostId, UserId};

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_id: UserId,
}

impl Post {
    /// Check whether `user_id` wrote this post
    #[inline]
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    /// Replace title and content
    pub fn edit(&mut self, title: String, content: String) {
        self.title = title;
        self.content = content;
    }
}

/// Values needed to insert a post row; `created_at` is assigned by the database
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: UserId,
}

/// A post joined with its author, as shown on listing and detail pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: User,
}
