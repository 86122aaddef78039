//! Post handlers
//!
//! Anyone may read a post; creating needs a login and changing one needs
//! to be its author.

use axum::{extract::State, response::Response};
use brevity_core::PostId;
use brevity_service::{FormErrors, PostForm, PostService, ServiceError};

use crate::extractors::{Flash, HtmlForm, PageContext, PostIdPath, RequireUser};
use crate::render;
use crate::response::WebResult;
use crate::state::AppState;

const NEW_POST: &str = "New Post";
const UPDATE_POST: &str = "Update Post";

fn update_url(post_id: PostId) -> String {
    format!("/post/{post_id}/update")
}

/// GET /post/new
pub async fn new_post_form(RequireUser(_identity): RequireUser, page: PageContext) -> Response {
    page.render(
        Some(NEW_POST),
        render::post_form_page(NEW_POST, "/post/new", &PostForm::default(), &FormErrors::new()),
    )
}

/// POST /post/new
pub async fn create_post(
    State(state): State<AppState>,
    RequireUser(identity): RequireUser,
    page: PageContext,
    HtmlForm(form): HtmlForm<PostForm>,
) -> WebResult<Response> {
    match PostService::new(state.service_context())
        .create(&identity, form.clone())
        .await
    {
        Ok(_) => Ok(page.flash_redirect(Flash::success("Your post has been created!"), "/home")),
        Err(ServiceError::Form(errors)) => Ok(page.render(
            Some(NEW_POST),
            render::post_form_page(NEW_POST, "/post/new", &form, &errors),
        )),
        Err(e) => Err(e.into()),
    }
}

/// GET /post/:id
pub async fn show_post(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
    page: PageContext,
) -> WebResult<Response> {
    let entry = PostService::new(state.service_context()).read(post_id).await?;
    let is_author = page
        .identity()
        .is_some_and(|identity| entry.post.is_authored_by(identity.id()));

    let content = render::post_page(&entry, is_author);
    Ok(page.render(Some(entry.post.title.as_str()), content))
}

/// GET /post/:id/update
pub async fn update_post_form(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
    RequireUser(identity): RequireUser,
    page: PageContext,
) -> WebResult<Response> {
    let post = PostService::new(state.service_context())
        .find_owned(&identity, post_id)
        .await?;

    Ok(page.render(
        Some(UPDATE_POST),
        render::post_form_page(
            UPDATE_POST,
            &update_url(post_id),
            &PostForm::from_post(&post),
            &FormErrors::new(),
        ),
    ))
}

/// POST /post/:id/update
pub async fn update_post(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
    RequireUser(identity): RequireUser,
    page: PageContext,
    HtmlForm(form): HtmlForm<PostForm>,
) -> WebResult<Response> {
    match PostService::new(state.service_context())
        .update(&identity, post_id, form.clone())
        .await
    {
        Ok(post) => Ok(page.flash_redirect(
            Flash::success("Your post has been updated!"),
            &format!("/post/{}", post.id),
        )),
        Err(ServiceError::Form(errors)) => Ok(page.render(
            Some(UPDATE_POST),
            render::post_form_page(UPDATE_POST, &update_url(post_id), &form, &errors),
        )),
        Err(e) => Err(e.into()),
    }
}

/// POST /post/:id/delete
pub async fn delete_post(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
    RequireUser(identity): RequireUser,
    page: PageContext,
) -> WebResult<Response> {
    PostService::new(state.service_context())
        .delete(&identity, post_id)
        .await?;

    Ok(page.flash_redirect(Flash::success("Your post has been deleted!"), "/home"))
}
