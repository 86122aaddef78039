//! The authenticated user behind one request

use brevity_core::{User, UserId};

/// Logged-in user resolved from the session cookie
///
/// Handlers receive it explicitly and hand it to every service call that
/// needs to know who is acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user: User,
}

impl Identity {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    #[inline]
    pub fn id(&self) -> UserId {
        self.user.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn into_user(self) -> User {
        self.user
    }
}
