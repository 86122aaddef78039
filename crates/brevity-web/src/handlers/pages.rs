//! Home and about pages

use axum::{extract::State, response::Response};
use brevity_service::PostService;

use crate::extractors::PageContext;
use crate::render;
use crate::response::{WebError, WebResult};
use crate::state::AppState;

/// GET / and GET /home
pub async fn home(State(state): State<AppState>, page: PageContext) -> WebResult<Response> {
    let posts = PostService::new(state.service_context()).list().await?;
    Ok(page.render(None, render::home_page(&posts)))
}

/// GET /about
pub async fn about(page: PageContext) -> Response {
    page.render(Some("About"), render::about_page())
}

/// Any URL without a route
pub async fn not_found() -> WebError {
    WebError::url_not_found()
}
