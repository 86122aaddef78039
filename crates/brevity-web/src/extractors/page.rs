//! Per-request page context
//!
//! Bundles what every rendered page needs: the identity for the navigation
//! bar, pending flash messages, and the cookie jar that outgoing cookies are
//! written to.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use brevity_service::Identity;
use maud::Markup;

use super::flash::{clear_flashes, push_flash, read_flashes, Flash};
use super::session::CurrentUser;
use crate::render;
use crate::response::WebError;
use crate::state::AppState;

#[derive(Debug)]
pub struct PageContext {
    identity: Option<Identity>,
    flashes: Vec<Flash>,
    jar: CookieJar,
    app_name: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(identity) = CurrentUser::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        Ok(Self {
            identity,
            flashes: read_flashes(&jar),
            jar,
            app_name: app_state.config().app.name.clone(),
        })
    }
}

impl PageContext {
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Show a message on the page rendered by this request
    pub fn flash_now(&mut self, flash: Flash) {
        self.flashes.push(flash);
    }

    /// Attach a cookie to the eventual response
    #[must_use]
    pub fn add_cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.jar = self.jar.add(cookie);
        self
    }

    /// Rewrite the outgoing cookie jar
    #[must_use]
    pub fn map_jar(mut self, f: impl FnOnce(CookieJar) -> CookieJar) -> Self {
        self.jar = f(self.jar);
        self
    }

    /// Wrap `content` in the site layout; pending flashes are consumed
    pub fn render(self, title: Option<&str>, content: Markup) -> Response {
        let page = render::layout(
            &self.app_name,
            title,
            self.identity.is_some(),
            &self.flashes,
            content,
        );
        (clear_flashes(self.jar), page).into_response()
    }

    /// 303 to `to` without a message
    pub fn redirect(self, to: &str) -> Response {
        (self.jar, Redirect::to(to)).into_response()
    }

    /// Queue `flash` for the next page, then 303 to `to`
    pub fn flash_redirect(self, flash: Flash, to: &str) -> Response {
        (push_flash(self.jar, flash), Redirect::to(to)).into_response()
    }
}
