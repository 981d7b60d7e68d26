use crate::{FormField, SignupForm, ValidationError, ValidationResult};

use std::sync::LazyLock;

use regex::Regex;

const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._:$!%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("invalid email pattern")
});

static OTP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{0,6}$").expect("invalid otp pattern"));

/// Per-field well-formedness rules for the signup form. Stateless.
pub struct SignupValidator;

impl SignupValidator {
    /// Check one field value. `Ok(())` means no message to show.
    #[track_caller]
    pub fn validate(field: FormField, value: &str) -> ValidationResult<()> {
        match field {
            FormField::Username => Self::validate_username(value),
            FormField::Email => Self::validate_email(value),
            FormField::Password => Self::validate_password(value),
            FormField::Otp => Self::validate_otp(value),
        }
    }

    /// Check the current value of `field` in `form`, as done when the field loses focus.
    #[track_caller]
    pub fn validate_field(field: FormField, form: &SignupForm) -> ValidationResult<()> {
        Self::validate(field, form.get(field))
    }

    #[track_caller]
    pub fn validate_username(value: &str) -> ValidationResult<()> {
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field(FormField::Username));
        }
        Ok(())
    }

    #[track_caller]
    pub fn validate_email(value: &str) -> ValidationResult<()> {
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field(FormField::Email));
        }
        if !Self::is_valid_email(value) {
            return Err(ValidationError::invalid_format(FormField::Email));
        }
        Ok(())
    }

    #[track_caller]
    pub fn validate_password(value: &str) -> ValidationResult<()> {
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field(FormField::Password));
        }
        if !Self::is_strong_password(value) {
            return Err(ValidationError::weak_password());
        }
        Ok(())
    }

    /// The code is optional until final submit, so empty passes here.
    #[track_caller]
    pub fn validate_otp(value: &str) -> ValidationResult<()> {
        if !OTP_PATTERN.is_match(value) {
            return Err(ValidationError::invalid_format(FormField::Otp));
        }
        Ok(())
    }

    pub fn is_valid_email(value: &str) -> bool {
        EMAIL_PATTERN.is_match(value)
    }

    /// At least one letter, one digit and six characters.
    pub fn is_strong_password(value: &str) -> bool {
        value.chars().count() >= MIN_PASSWORD_LENGTH
            && value.chars().any(|c| c.is_ascii_alphabetic())
            && value.chars().any(|c| c.is_ascii_digit())
    }
}
