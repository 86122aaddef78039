//! Route definitions
//!
//! Page routes, static files, and health probes.

use std::path::Path;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};
use tower_http::services::ServeDir;

use crate::handlers::{health, pages, posts, users};
use crate::state::AppState;

/// Create the page router (excluding health for separate middleware handling)
///
/// `max_upload_bytes` caps the account form body, which may carry a picture.
pub fn create_router(static_dir: &Path, max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(main_routes())
        .merge(user_routes(max_upload_bytes))
        .merge(post_routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(pages::not_found)
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn main_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/home", get(pages::home))
        .route("/about", get(pages::about))
}

fn user_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/register", get(users::register_form).post(users::register))
        .route("/login", get(users::login_form).post(users::login))
        .route("/logout", get(users::logout))
        .route(
            "/account",
            get(users::account)
                .post(users::update_account)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/post/new", get(posts::new_post_form).post(posts::create_post))
        .route("/post/:id", get(posts::show_post))
        .route(
            "/post/:id/update",
            get(posts::update_post_form).post(posts::update_post),
        )
        .route("/post/:id/delete", post(posts::delete_post))
}
