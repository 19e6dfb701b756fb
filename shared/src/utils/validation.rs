//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

// Anything other than whitespace; used for required text fields
pub static NOT_BLANK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S").unwrap());

/// Validation failure for a single form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }

    /// A mandatory field was left empty
    pub fn required(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("{} is required", field);
        Self::new(field, message, "REQUIRED_FIELD")
    }
}

/// Collection of validation errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(error: FieldError) -> Self {
        Self { errors: vec![error] }
    }

    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) {
        self.add(FieldError::new(field, message, code));
    }

    /// Record a required-field error when `value` is blank
    pub fn require(&mut self, field: &str, value: &str) {
        if !validators::not_empty(value) {
            self.add(FieldError::required(field));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// The first message, used for the transient notification
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    pub fn to_field_errors(&self) -> HashMap<String, Vec<String>> {
        let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();
        for error in &self.errors {
            field_errors
                .entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        field_errors
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Field names come from struct fields (`secondary_phone` becomes
/// `secondary phone`); errors are ordered by field name.
impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let mut collected = FieldErrors::new();
        for (field, list) in fields {
            let field = field.replace('_', " ");
            for error in list {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                };
                collected.add_error(field.clone(), message, error.code.to_string());
            }
        }
        collected
    }
}

/// Run the derived field rules of `input`
pub fn check_fields<T: validator::Validate>(input: &T) -> FieldErrors {
    match validator::Validate::validate(input) {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors.into(),
    }
}

/// Trait for form inputs that can be validated before any network call
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Common validation functions
pub mod validators {
    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string has at least `min` characters
    pub fn min_length(value: &str, min: usize) -> bool {
        value.chars().count() >= min
    }

    /// Check if a string length is within bounds
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.chars().count();
        len >= min && len <= max
    }

    /// Check if a string consists of ASCII digits only
    pub fn all_digits(value: &str) -> bool {
        !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
    }
}
