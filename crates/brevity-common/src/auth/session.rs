//! Login session tokens
//!
//! The session cookie carries an HS256 JWT whose subject is the user id.
//! Signing with the application secret key makes the cookie tamper-evident
//! without any server-side session store.

use brevity_core::UserId;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims stored in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Whether the login asked to be remembered across browser restarts
    #[serde(default)]
    pub remember: bool,
}

impl SessionClaims {
    /// Get the user ID from the subject
    ///
    /// # Errors
    /// Returns an error if the subject is not a user id
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidSession)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct SessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_expiry: Duration,
    remember_expiry: Duration,
}

impl SessionTokens {
    /// Create a token service from the secret key and lifetimes
    #[must_use]
    pub fn new(secret: &str, expiry_hours: i64, remember_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_expiry: Duration::hours(expiry_hours),
            remember_expiry: Duration::days(remember_days),
        }
    }

    /// Lifetime of the persistent cookie for remembered logins
    #[must_use]
    pub fn remember_expiry(&self) -> Duration {
        self.remember_expiry
    }

    /// Issue a token for `user_id`
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, user_id: UserId, remember: bool) -> Result<String, AppError> {
        let now = Utc::now();
        let lifetime = if remember {
            self.remember_expiry
        } else {
            self.session_expiry
        };

        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            remember,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode session token: {e}")))
    }

    /// Decode and validate a token
    ///
    /// # Errors
    /// Returns `SessionExpired` for expired tokens and `InvalidSession` otherwise
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        let validation = Validation::default();

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::SessionExpired,
                    _ => AppError::InvalidSession,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Verify a token and return its user id
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or has a malformed subject
    pub fn user_id(&self, token: &str) -> Result<UserId, AppError> {
        self.verify(token)?.user_id()
    }
}

impl std::fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokens")
            .field("session_expiry", &self.session_expiry)
            .field("remember_expiry", &self.remember_expiry)
            .finish_non_exhaustive()
    }
}
