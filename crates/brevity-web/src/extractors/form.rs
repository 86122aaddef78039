//! URL-encoded form extractor
//!
//! Wraps [`axum::Form`] so malformed bodies render the HTML error page
//! instead of axum's plain-text rejection. Field rules are checked later by
//! the service layer, which re-renders the form on failure.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;

use crate::response::WebError;

#[derive(Debug, Clone)]
pub struct HtmlForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for HtmlForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| WebError::Rejected(e.status(), e.body_text()))?;

        Ok(HtmlForm(value))
    }
}
