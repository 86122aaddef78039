//! Registration, login, and account pages
//!
//! Passwords are never written back into a re-rendered form.

use brevity_core::User;
use brevity_service::{FormErrors, LoginForm, RegistrationForm, UpdateAccountForm};
use maud::{html, Markup};

use super::fields;

pub fn register_page(form: &RegistrationForm, errors: &FormErrors) -> Markup {
    html! {
        div.content-section {
            form method="POST" action="/register" {
                fieldset.form-group {
                    legend.border-bottom.mb-4 { "Join Today" }
                    (fields::input("text", "username", "Username", Some(form.username.as_str()), errors))
                    (fields::input("email", "email", "Email", Some(form.email.as_str()), errors))
                    (fields::input("password", "password", "Password", None, errors))
                    (fields::input("password", "confirm_password", "Confirm Password", None, errors))
                }
                (fields::submit("Sign Up"))
            }
        }
        div.border-top.pt-3 {
            small.text-muted {
                "Already Have An Account? "
                a.ml-2 href="/login" { "Sign In" }
            }
        }
    }
}

/// `action` keeps the `next` query so the redirect survives a failed attempt
pub fn login_page(action: &str, form: &LoginForm, errors: &FormErrors) -> Markup {
    html! {
        div.content-section {
            form method="POST" action=(action) {
                fieldset.form-group {
                    legend.border-bottom.mb-4 { "Log In" }
                    (fields::input("email", "email", "Email", Some(form.email.as_str()), errors))
                    (fields::input("password", "password", "Password", None, errors))
                    (fields::checkbox("remember", "Remember Me", form.remember))
                }
                (fields::submit("Login"))
            }
        }
        div.border-top.pt-3 {
            small.text-muted {
                "Need An Account? "
                a.ml-2 href="/register" { "Sign Up Now" }
            }
        }
    }
}

/// Profile card plus the multipart update form
pub fn account_page(user: &User, form: &UpdateAccountForm, errors: &FormErrors) -> Markup {
    html! {
        div.content-section {
            div.media {
                img.rounded-circle.account-img src=(user.image_url()) alt="";
                div.media-body {
                    h2.account-heading { (user.username) }
                    p.text-secondary { (user.email) }
                }
            }
            form method="POST" action="/account" enctype="multipart/form-data" {
                fieldset.form-group {
                    legend.border-bottom.mb-4 { "Account Info" }
                    (fields::input("text", "username", "Username", Some(form.username.as_str()), errors))
                    (fields::input("email", "email", "Email", Some(form.email.as_str()), errors))
                    (fields::file("picture", "Update Profile Picture", ".jpg,.png", errors))
                }
                (fields::submit("Update"))
            }
        }
    }
}
