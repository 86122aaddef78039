//! Axum extractors for request handling
//!
//! Custom extractors for the session identity, flash messages, forms, and
//! path parameters.

mod flash;
mod form;
mod page;
mod path;
mod session;

pub use flash::{
    clear_flashes, push_flash, read_flashes, Flash, FlashCategory, FLASH_COOKIE,
};
pub use form::HtmlForm;
pub use page::PageContext;
pub use path::PostIdPath;
pub use session::{
    remove_session, safe_next, session_cookie, CurrentUser, RequireUser, SESSION_COOKIE,
};
