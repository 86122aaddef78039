//! One-shot flash messages
//!
//! Messages ride in the `flash` cookie as base64-encoded JSON and are cleared
//! by the next page that renders them.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the cookie carrying pending flash messages
pub const FLASH_COOKIE: &str = "flash";

/// Visual category, used as the alert's CSS class suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Info,
    Danger,
}

impl FlashCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Danger => "danger",
        }
    }
}

/// A message shown once on the next rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn new(category: FlashCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Info, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Danger, message)
    }
}

/// Pending messages in the jar; a tampered or stale cookie reads as empty
#[must_use]
pub fn read_flashes(jar: &CookieJar) -> Vec<Flash> {
    jar.get(FLASH_COOKIE)
        .map(|cookie| decode(cookie.value()))
        .unwrap_or_default()
}

/// Queue `flash` behind any messages already pending
#[must_use]
pub fn push_flash(jar: CookieJar, flash: Flash) -> CookieJar {
    let mut flashes = read_flashes(&jar);
    flashes.push(flash);

    match encode(&flashes) {
        Some(value) => jar.add(
            Cookie::build((FLASH_COOKIE, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        ),
        None => jar,
    }
}

/// Drop the flash cookie once its messages have been shown
#[must_use]
pub fn clear_flashes(jar: CookieJar) -> CookieJar {
    if jar.get(FLASH_COOKIE).is_none() {
        return jar;
    }
    jar.remove(Cookie::build(FLASH_COOKIE).path("/"))
}

fn encode(flashes: &[Flash]) -> Option<String> {
    match serde_json::to_vec(flashes) {
        Ok(json) => Some(URL_SAFE_NO_PAD.encode(json)),
        Err(e) => {
            debug!(error = %e, "Failed to encode flash messages");
            None
        }
    }
}

fn decode(value: &str) -> Vec<Flash> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}
