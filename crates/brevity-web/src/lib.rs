//! # brevity-web
//!
//! Server-rendered blog built on Axum: session cookies, flash messages,
//! and `maud` pages over the service layer.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
