//! Registration and login forms

use serde::Deserialize;
use validator::Validate;

use super::FormErrors;

/// Sign-up form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegistrationForm {
    #[validate(length(min = 2, max = 20, message = "Field must be between 2 and 20 characters long."))]
    #[serde(default)]
    pub username: String,

    #[validate(
        email(message = "Invalid email address."),
        length(max = 120, message = "Field cannot be longer than 120 characters.")
    )]
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,

    #[validate(must_match(other = "password", message = "Field must be equal to password."))]
    #[serde(default)]
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Run every field rule
    ///
    /// # Errors
    /// Returns the failing fields with their messages
    pub fn validate_form(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::from_validation(self.validate());
        errors.require("username", &self.username);
        errors.require("email", &self.email);
        errors.require("password", &self.password);
        errors.require("confirm_password", &self.confirm_password);
        errors.into_result()
    }
}

/// Sign-in form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Invalid email address."))]
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,

    /// Checkbox: present (any value) when ticked
    #[serde(default, deserialize_with = "checkbox")]
    pub remember: bool,
}

impl LoginForm {
    /// Run every field rule
    ///
    /// # Errors
    /// Returns the failing fields with their messages
    pub fn validate_form(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::from_validation(self.validate());
        errors.require("email", &self.email);
        errors.require("password", &self.password);
        errors.into_result()
    }
}

/// An HTML checkbox is only submitted when ticked
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.is_some_and(|v| !matches!(v.as_str(), "" | "false" | "off" | "0")))
}
