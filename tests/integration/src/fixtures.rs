//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. Names embed a
//! timestamp so reruns against the same database do not collide.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data, at most 15 digits
pub fn unique_suffix() -> String {
    let stamp = chrono::Utc::now().timestamp_micros().rem_euclid(1_000_000_000_000);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst) % 1000;
    format!("{stamp}{n:03}")
}

/// A user that has not registered yet
#[derive(Debug, Clone)]
pub struct TestUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl TestUser {
    /// Fresh username and email; the username stays within 20 characters
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("u{suffix}"),
            email: format!("u{suffix}@example.com"),
            password: "secret1".to_string(),
        }
    }

    pub fn registration_form(&self) -> [(&'static str, &str); 4] {
        [
            ("username", self.username.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
            ("confirm_password", self.password.as_str()),
        ]
    }

    pub fn login_form(&self) -> [(&'static str, &str); 2] {
        [("email", self.email.as_str()), ("password", self.password.as_str())]
    }
}

/// Title and content for a new post, unique per call
pub fn post_form(title: &str) -> [(&'static str, String); 2] {
    [
        ("title", format!("{title} {}", unique_suffix())),
        ("content", "World".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_user_fits_username_limit() {
        let user = TestUser::unique();
        assert!(user.username.len() <= 20);
        assert_ne!(user.username, TestUser::unique().username);
    }
}
