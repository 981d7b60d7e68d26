use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Input fields of the signup form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Username,
    Email,
    Password,
    /// One-time code typed into the verification modal
    #[serde(rename = "verify", alias = "otp")]
    Otp,
}

impl FormField {
    /// Wire id, also the JSON key sent to the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::Otp => "verify",
        }
    }

    /// Name used in user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::Otp => "OTP",
        }
    }

    /// Message shown when the field is left blank
    pub fn empty_message(&self) -> String {
        format!("Please fill out {} fields.", self.label())
    }

    /// Message shown when the field is filled but malformed
    pub fn invalid_message(&self) -> String {
        match self {
            Self::Otp => String::from("OTP must be up to 6 digits"),
            _ => format!("Invalid {}", self.label()),
        }
    }
}

impl FromStr for FormField {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "username" => Ok(Self::Username),
            "email" => Ok(Self::Email),
            "password" => Ok(Self::Password),
            "verify" | "otp" => Ok(Self::Otp),
            _ => Err(CoreError::InvalidFormField {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
