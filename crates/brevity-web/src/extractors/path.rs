//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use brevity_core::PostId;

use crate::response::WebError;

/// Post id from `/post/:id`
///
/// Anything but an unsigned integer is treated as an unknown URL.
#[derive(Debug, Clone, Copy)]
pub struct PostIdPath(pub PostId);

#[async_trait]
impl<S> FromRequestParts<S> for PostIdPath
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| WebError::url_not_found())?;

        raw.parse()
            .map(Self)
            .map_err(|_| WebError::url_not_found())
    }
}
