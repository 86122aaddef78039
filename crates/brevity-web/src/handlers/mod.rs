//! Route handlers
//!
//! Page handlers follow POST/redirect/GET: a successful form submission
//! queues a flash message and answers with a 303.

pub mod health;
pub mod pages;
pub mod posts;
pub mod users;
