//! Field-level validation errors

use std::collections::BTreeMap;

use validator::ValidationErrors;

/// Message shown for a blank required field
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Validation messages keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to `field`
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for `field`, in the order they were added
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of the fields that failed
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Mark `field` as missing when `value` is blank.
    ///
    /// A missing value stops the chain: any other message on the field is dropped.
    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.fields
                .insert(field.to_string(), vec![REQUIRED_MESSAGE.to_string()]);
        }
    }

    /// `Ok` when nothing failed
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Start from the outcome of a `validator` run
    pub fn from_validation(result: Result<(), ValidationErrors>) -> Self {
        result.err().map(Self::from).unwrap_or_default()
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = Self::new();
        for (field, list) in errors.field_errors() {
            for error in list {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                out.add(&field.to_string(), message);
            }
        }
        out
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}
