//! Input captured by the registration and password-reset steps.

use chrono::{Local, NaiveDate};
use lp_shared::phone::{is_valid_local_mobile, LOCAL_MOBILE_REGEX};
use lp_shared::validation::{check_fields, validators, FieldErrors, Validate, NOT_BLANK_REGEX};

use crate::domain::entities::{District, ExamYear, Gender, Stream};

/// Birth dates are exchanged as ISO dates
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

const INVALID_PHONE_MESSAGE: &str = "Enter a valid mobile number (07XXXXXXXX)";

/// Add an error when `password` is missing or shorter than `min_length`
pub fn check_password(errors: &mut FieldErrors, field: &str, password: &str, min_length: usize) {
    if password.is_empty() {
        errors.add_error(field, format!("{} is required", field), "REQUIRED_FIELD");
    } else if password.chars().count() < min_length {
        errors.add_error(
            field,
            format!("Password must be at least {} characters", min_length),
            "PASSWORD_TOO_SHORT",
        );
    }
}

/// Add an error unless `phone` is a local mobile number
pub fn check_mobile(errors: &mut FieldErrors, field: &str, phone: &str) {
    if !is_valid_local_mobile(phone) {
        errors.add_error(field, INVALID_PHONE_MESSAGE, "INVALID_PHONE");
    }
}

/// First registration step
#[derive(Debug, Clone, Default, PartialEq, Eq, validator::Validate)]
pub struct RegisterForm {
    #[validate(regex(path = *NOT_BLANK_REGEX, code = "REQUIRED_FIELD", message = "name is required"))]
    pub name: String,
    /// ISO date (YYYY-MM-DD)
    pub birth_date: String,
    #[validate(required(code = "REQUIRED_FIELD", message = "gender is required"))]
    pub gender: Option<Gender>,
    #[validate(required(code = "REQUIRED_FIELD", message = "exam year is required"))]
    pub exam_year: Option<ExamYear>,
}

impl RegisterForm {
    /// Validate against a fixed "today" so birth dates in the future are refused
    pub fn validate_on(&self, today: NaiveDate) -> Result<(), FieldErrors> {
        let mut errors = check_fields(self);

        if !validators::not_empty(&self.birth_date) {
            errors.add_error("birth date", "birth date is required", "REQUIRED_FIELD");
        } else {
            match NaiveDate::parse_from_str(self.birth_date.trim(), BIRTH_DATE_FORMAT) {
                Ok(date) if date > today => {
                    errors.add_error("birth date", "Birth date cannot be in the future", "INVALID_DATE")
                }
                Ok(_) => {}
                Err(_) => errors.add_error("birth date", "Enter the birth date as YYYY-MM-DD", "INVALID_DATE"),
            }
        }
        errors.into_result()
    }
}

impl Validate for RegisterForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        self.validate_on(Local::now().date_naive())
    }
}

/// Final registration step
#[derive(Debug, Clone, Default, PartialEq, Eq, validator::Validate)]
pub struct OtherDetailsForm {
    #[validate(regex(path = *NOT_BLANK_REGEX, code = "REQUIRED_FIELD", message = "address is required"))]
    pub address: String,
    #[validate(regex(path = *NOT_BLANK_REGEX, code = "REQUIRED_FIELD", message = "school is required"))]
    pub school: String,
    #[validate(required(code = "REQUIRED_FIELD", message = "district is required"))]
    pub district: Option<District>,
    #[validate(required(code = "REQUIRED_FIELD", message = "stream is required"))]
    pub stream: Option<Stream>,
    #[validate(regex(path = *NOT_BLANK_REGEX, code = "REQUIRED_FIELD", message = "institute is required"))]
    pub institute: String,
    #[validate(regex(path = *LOCAL_MOBILE_REGEX, code = "INVALID_PHONE", message = "Enter a valid mobile number (07XXXXXXXX)"))]
    pub secondary_phone: String,
}

impl Validate for OtherDetailsForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        check_fields(self).into_result()
    }
}

/// New password and its confirmation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordResetForm {
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordResetForm {
    pub fn check(&self, min_length: usize) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_password(&mut errors, "new password", &self.new_password, min_length);
        if self.confirm_password != self.new_password {
            errors.add_error("confirm password", "Passwords do not match", "PASSWORD_MISMATCH");
        }
        errors.into_result()
    }

    pub fn clear(&mut self) {
        self.new_password.clear();
        self.confirm_password.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn register_form() -> RegisterForm {
        RegisterForm {
            name: "Nimal Perera".to_string(),
            birth_date: "2006-03-14".to_string(),
            gender: Some(Gender::Male),
            exam_year: Some(ExamYear::Y2026),
        }
    }

    #[test]
    fn test_register_form_accepts_complete_input() {
        assert!(register_form().validate_on(today()).is_ok());
    }

    #[test]
    fn test_register_form_requires_every_field() {
        let errors = RegisterForm::default().validate_on(today()).unwrap_err();
        for field in ["name", "birth date", "gender", "exam year"] {
            assert!(errors.has_field(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_register_form_rejects_bad_birth_dates() {
        let mut form = register_form();
        form.birth_date = "14/03/2006".to_string();
        assert!(form.validate_on(today()).unwrap_err().has_field("birth date"));

        form.birth_date = "2030-01-01".to_string();
        let errors = form.validate_on(today()).unwrap_err();
        assert_eq!(errors.first_message(), Some("Birth date cannot be in the future"));
    }

    #[test]
    fn test_other_details_secondary_phone_must_be_mobile() {
        let mut form = OtherDetailsForm {
            address: "12 Temple Road".to_string(),
            school: "Royal College".to_string(),
            district: Some(District::Colombo),
            stream: Some(Stream::Commerce),
            institute: "Sipwin".to_string(),
            secondary_phone: "0771234567".to_string(),
        };
        assert!(form.validate().is_ok());

        form.secondary_phone = "0112345678".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.has_field("secondary phone"));
        assert_eq!(errors.errors().len(), 1);

        form.secondary_phone = " 0771234567".to_string();
        assert!(form.validate().unwrap_err().has_field("secondary phone"));
    }

    #[test]
    fn test_other_details_requires_every_field() {
        let errors = OtherDetailsForm::default().validate().unwrap_err();
        for field in ["address", "school", "district", "stream", "institute", "secondary phone"] {
            assert!(errors.has_field(field), "missing error for {}", field);
        }
        assert!(errors
            .errors()
            .iter()
            .filter(|e| e.field != "secondary phone")
            .all(|e| e.code == "REQUIRED_FIELD"));
    }

    #[test]
    fn test_password_reset_requires_match_and_length() {
        let short = PasswordResetForm {
            new_password: "abc".to_string(),
            confirm_password: "abc".to_string(),
        };
        assert!(short.check(6).unwrap_err().has_field("new password"));

        let mismatch = PasswordResetForm {
            new_password: "secret12".to_string(),
            confirm_password: "secret13".to_string(),
        };
        assert!(mismatch.check(6).unwrap_err().has_field("confirm password"));

        let ok = PasswordResetForm {
            new_password: "secret12".to_string(),
            confirm_password: "secret12".to_string(),
        };
        assert!(ok.check(6).is_ok());
    }
}
