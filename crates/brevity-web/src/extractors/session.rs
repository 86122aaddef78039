//! Session identity extractors
//!
//! Resolves the `session` cookie into an explicit [`Identity`] for the
//! request. Handlers ask for [`CurrentUser`] when anonymous visitors are fine
//! and [`RequireUser`] when the page needs a login.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use brevity_service::{AuthService, Identity};

use crate::response::WebError;
use crate::state::AppState;

/// Name of the cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "session";

/// Identity resolved earlier in the same request
#[derive(Clone)]
struct ResolvedIdentity(Option<Identity>);

/// The logged-in user, or `None` for anonymous visitors
///
/// Missing, invalid, and expired cookies all resolve to anonymous.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Identity>);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ResolvedIdentity(identity)) = parts.extensions.get::<ResolvedIdentity>() {
            return Ok(Self(identity.clone()));
        }

        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let identity = match jar.get(SESSION_COOKIE) {
            Some(cookie) => {
                AuthService::new(app_state.service_context())
                    .resolve_identity(cookie.value())
                    .await?
            }
            None => None,
        };

        parts.extensions.insert(ResolvedIdentity(identity.clone()));
        Ok(Self(identity))
    }
}

/// A logged-in user; anonymous visitors are sent to the login page
#[derive(Debug, Clone)]
pub struct RequireUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(identity) = CurrentUser::from_request_parts(parts, state).await?;

        identity.map(Self).ok_or_else(|| {
            let next = parts
                .uri
                .path_and_query()
                .map_or_else(|| parts.uri.path().to_string(), ToString::to_string);
            tracing::debug!(next = %next, "Anonymous request to a login-only page");
            WebError::LoginRequired {
                next,
                jar: CookieJar::from_headers(&parts.headers),
            }
        })
    }
}

/// Build the session cookie for a fresh login
///
/// Without `persist_for` the cookie lasts until the browser closes.
#[must_use]
pub fn session_cookie(
    token: String,
    persist_for: Option<chrono::Duration>,
    secure: bool,
) -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);

    if let Some(lifetime) = persist_for {
        cookie = cookie.max_age(time::Duration::seconds(lifetime.num_seconds()));
    }

    cookie.build()
}

/// Expire the session cookie
#[must_use]
pub fn remove_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Accept a post-login redirect target only if it stays on this site
///
/// Protocol-relative (`//host`) and backslash tricks are refused, as is
/// anything that could not go into a `Location` header verbatim.
#[must_use]
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|target| {
        target.starts_with('/')
            && !target.starts_with("//")
            && !target.contains('\\')
            && target.bytes().all(|b| b.is_ascii_graphic())
    })
}
