//! Integration test utilities for the blog
//!
//! This crate provides helpers for running end-to-end tests against a
//! spawned server through a cookie-keeping HTTP client.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
