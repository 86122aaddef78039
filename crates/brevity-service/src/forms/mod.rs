//! HTML form payloads and their validation
//!
//! Every form derives `validator::Validate` for its field rules and exposes a
//! `validate_form` method that folds the result into [`FormErrors`], the
//! per-field message list the pages render next to each input.

mod account;
mod auth;
mod errors;
mod post;

pub use account::UpdateAccountForm;
pub use auth::{LoginForm, RegistrationForm};
pub use errors::{FormErrors, REQUIRED_MESSAGE};
pub use post::PostForm;
