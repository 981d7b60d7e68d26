use crate::FormField;

use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

pub const WEAK_PASSWORD_MESSAGE: &str =
    "Password must minimum six characters, at least one letter, one number";

/// A single field failing its well-formedness rule.
///
/// `Display` carries the capture location for logs; `user_message()` is the
/// text shown next to the form.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Empty field '{field}' {location}")]
    EmptyField {
        field: FormField,
        location: ErrorLocation,
    },

    #[error("Invalid format for '{field}' {location}")]
    InvalidFormat {
        field: FormField,
        location: ErrorLocation,
    },

    #[error("Weak password {location}")]
    WeakPassword { location: ErrorLocation },
}

impl ValidationError {
    #[track_caller]
    pub fn empty_field(field: FormField) -> Self {
        Self::EmptyField {
            field,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_format(field: FormField) -> Self {
        Self::InvalidFormat {
            field,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn weak_password() -> Self {
        Self::WeakPassword {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The field this error belongs to.
    pub fn field(&self) -> FormField {
        match self {
            Self::EmptyField { field, .. } | Self::InvalidFormat { field, .. } => *field,
            Self::WeakPassword { .. } => FormField::Password,
        }
    }

    /// Text displayed to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyField { field, .. } => field.empty_message(),
            Self::InvalidFormat { field, .. } => field.invalid_message(),
            Self::WeakPassword { .. } => String::from(WEAK_PASSWORD_MESSAGE),
        }
    }
}

pub type Result<T> = StdResult<T, ValidationError>;
