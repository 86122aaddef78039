//! HTML rendering with `maud`
//!
//! Every page is a function returning [`maud::Markup`]; user-supplied text is
//! escaped by the `html!` macro.

mod error;
mod fields;
mod layout;
mod posts;
mod users;

pub use error::error_page;
pub use layout::layout;
pub use posts::{about_page, home_page, post_form_page, post_page};
pub use users::{account_page, login_page, register_page};
