//! # brevity-service
//!
//! Application layer containing forms, validation, and the services behind
//! every page of the blog.

pub mod forms;
pub mod services;

pub use forms::{FormErrors, LoginForm, PostForm, RegistrationForm, UpdateAccountForm};
pub use services::{
    AccountService, AuthService, AvatarStore, Identity, PictureUpload, PostService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
