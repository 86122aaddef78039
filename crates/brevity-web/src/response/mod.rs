//! Error responses for page handlers
//!
//! Errors that escape a handler become an HTML error page, except for
//! [`WebError::LoginRequired`], which sends the visitor to the login form.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use brevity_common::AppError;
use brevity_service::ServiceError;
use thiserror::Error;
use tracing::error;

use crate::extractors::{push_flash, Flash};
use crate::render;

const NOT_FOUND_DESCRIPTION: &str = "The requested URL was not found on the server. \
     If you entered the URL manually please check your spelling and try again.";
const FORBIDDEN_DESCRIPTION: &str = "You don't have the permission to access the requested \
     resource. It is either read-protected or not readable by the server.";
const INTERNAL_DESCRIPTION: &str = "The server encountered an internal error and was unable \
     to complete your request. Either the server is overloaded or there is an error in the \
     application.";

/// Web error type for consistent error pages
#[derive(Debug, Error)]
pub enum WebError {
    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    NotFound(String),

    /// `jar` holds the request's cookies so queued flashes are kept
    #[error("Please log in to access this page.")]
    LoginRequired { next: String, jar: CookieJar },

    #[error("{1}")]
    Rejected(StatusCode, String),
}

impl WebError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Service(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::App(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::LoginRequired { .. } => StatusCode::SEE_OTHER,
            Self::Rejected(status, _) => *status,
        }
    }

    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::Service(e) => e.error_code(),
            Self::App(e) => e.error_code(),
            Self::NotFound(_) => "NOT_FOUND",
            Self::LoginRequired { .. } => "LOGIN_REQUIRED",
            Self::Rejected(..) => "BAD_REQUEST",
        }
    }

    /// 404 for a URL no route or converter accepts
    #[must_use]
    pub fn url_not_found() -> Self {
        Self::NotFound(NOT_FOUND_DESCRIPTION.to_string())
    }

    /// Text shown under the status heading
    fn description(&self, status: StatusCode) -> String {
        match status {
            StatusCode::FORBIDDEN => FORBIDDEN_DESCRIPTION.to_string(),
            s if s.is_server_error() => INTERNAL_DESCRIPTION.to_string(),
            _ => self.to_string(),
        }
    }
}

/// Redirect to the login form, remembering where the visitor was headed
fn login_redirect(next: &str, jar: CookieJar) -> Response {
    let location = match serde_urlencoded::to_string([("next", next)]) {
        Ok(query) => format!("/login?{query}"),
        Err(_) => "/login".to_string(),
    };
    let jar = push_flash(jar, Flash::info(AppError::LoginRequired.to_string()));
    (jar, Redirect::to(&location)).into_response()
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if let Self::LoginRequired { next, jar } = self {
            return login_redirect(&next, jar);
        }

        let status = self.status_code();

        // Log server errors
        if status.is_server_error() {
            error!(error = ?self, code = self.error_code(), "Server error occurred");
        }

        let description = self.description(status);
        (status, render::error_page(status, &description)).into_response()
    }
}

/// Type alias for page handler results
pub type WebResult<T> = Result<T, WebError>;
