//! Authentication utilities

mod password;
mod session;

pub use password::{hash_password, verify_password, PasswordService};
pub use session::{SessionClaims, SessionTokens};
