//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod account;
pub mod auth;
pub mod avatar;
pub mod context;
pub mod error;
pub mod identity;
pub mod post;

// Re-export all services for convenience
pub use account::AccountService;
pub use auth::AuthService;
pub use avatar::{AvatarStore, PictureUpload};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use identity::Identity;
pub use post::PostService;
