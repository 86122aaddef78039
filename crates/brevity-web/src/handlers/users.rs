//! Registration, login, logout, and account handlers

use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    response::Response,
};
use brevity_common::AppError;
use brevity_service::{
    AccountService, AuthService, FormErrors, LoginForm, PictureUpload, RegistrationForm,
    ServiceError, UpdateAccountForm,
};
use serde::Deserialize;
use tracing::debug;

use crate::extractors::{
    remove_session, safe_next, session_cookie, Flash, HtmlForm, PageContext, RequireUser,
};
use crate::render;
use crate::response::{WebError, WebResult};
use crate::state::AppState;

/// Query string of the login page
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Form action for the login page, carrying a safe `next` along
fn login_action(next: Option<&str>) -> String {
    safe_next(next)
        .and_then(|target| serde_urlencoded::to_string([("next", target)]).ok())
        .map_or_else(|| "/login".to_string(), |query| format!("/login?{query}"))
}

fn without_passwords(form: &RegistrationForm) -> RegistrationForm {
    RegistrationForm {
        username: form.username.clone(),
        email: form.email.clone(),
        ..RegistrationForm::default()
    }
}

/// GET /register
pub async fn register_form(page: PageContext) -> Response {
    if page.is_authenticated() {
        return page.redirect("/home");
    }
    page.render(
        Some("Register"),
        render::register_page(&RegistrationForm::default(), &FormErrors::new()),
    )
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    page: PageContext,
    HtmlForm(form): HtmlForm<RegistrationForm>,
) -> WebResult<Response> {
    if page.is_authenticated() {
        return Ok(page.redirect("/home"));
    }

    let shown = without_passwords(&form);
    match AuthService::new(state.service_context()).register(form).await {
        Ok(_) => Ok(page.flash_redirect(
            Flash::success("Your account has been created! You are now able to log in"),
            "/login",
        )),
        Err(ServiceError::Form(errors)) => Ok(page.render(
            Some("Register"),
            render::register_page(&shown, &errors),
        )),
        Err(e) => Err(e.into()),
    }
}

/// GET /login
pub async fn login_form(page: PageContext, Query(query): Query<NextQuery>) -> Response {
    if page.is_authenticated() {
        return page.redirect("/home");
    }
    let action = login_action(query.next.as_deref());
    page.render(
        Some("Login"),
        render::login_page(&action, &LoginForm::default(), &FormErrors::new()),
    )
}

/// POST /login
///
/// An unknown email and a wrong password produce the same flash.
pub async fn login(
    State(state): State<AppState>,
    mut page: PageContext,
    Query(query): Query<NextQuery>,
    HtmlForm(form): HtmlForm<LoginForm>,
) -> WebResult<Response> {
    if page.is_authenticated() {
        return Ok(page.redirect("/home"));
    }

    let ctx = state.service_context();
    let auth = AuthService::new(ctx);
    let action = login_action(query.next.as_deref());

    match auth.login(&form).await {
        Ok(user) => {
            let token = auth.issue_session(&user, form.remember)?;
            let persist_for = form
                .remember
                .then(|| ctx.session_tokens().remember_expiry());
            let cookie =
                session_cookie(token, persist_for, state.config().app.env.is_production());

            let target = safe_next(query.next.as_deref()).unwrap_or("/home");
            Ok(page.add_cookie(cookie).redirect(target))
        }
        Err(ServiceError::Form(errors)) => Ok(page.render(
            Some("Login"),
            render::login_page(&action, &form, &errors),
        )),
        Err(ServiceError::App(AppError::InvalidCredentials)) => {
            page.flash_now(Flash::danger(AppError::InvalidCredentials.to_string()));
            Ok(page.render(
                Some("Login"),
                render::login_page(&action, &form, &FormErrors::new()),
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(page: PageContext) -> Response {
    page.map_jar(remove_session).redirect("/home")
}

/// GET /account
pub async fn account(RequireUser(identity): RequireUser, page: PageContext) -> Response {
    let user = identity.user();
    page.render(
        Some("Account"),
        render::account_page(user, &UpdateAccountForm::for_user(user), &FormErrors::new()),
    )
}

/// POST /account (multipart)
pub async fn update_account(
    State(state): State<AppState>,
    RequireUser(identity): RequireUser,
    page: PageContext,
    multipart: Multipart,
) -> WebResult<Response> {
    let (form, picture) = read_account_form(multipart).await?;

    match AccountService::new(state.service_context())
        .update(&identity, form.clone(), picture)
        .await
    {
        Ok(_) => Ok(page.flash_redirect(Flash::success("Your account has been updated!"), "/account")),
        Err(ServiceError::Form(errors)) => Ok(page.render(
            Some("Account"),
            render::account_page(identity.user(), &form, &errors),
        )),
        Err(e) => Err(e.into()),
    }
}

fn multipart_rejected(err: MultipartError) -> WebError {
    WebError::Rejected(err.status(), err.body_text())
}

/// Collect the text fields and the optional picture part
async fn read_account_form(
    mut multipart: Multipart,
) -> WebResult<(UpdateAccountForm, Option<PictureUpload>)> {
    let mut form = UpdateAccountForm::default();
    let mut picture = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_rejected)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "username" => form.username = field.text().await.map_err(multipart_rejected)?,
            "email" => form.email = field.text().await.map_err(multipart_rejected)?,
            "picture" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_rejected)?;

                // Browsers send an empty part when no file was chosen
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }
                picture = Some(PictureUpload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            other => debug!(field = other, "Ignoring unknown account form field"),
        }
    }

    Ok((form, picture))
}
