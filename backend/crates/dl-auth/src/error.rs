use dl_core::{CoreError, FormField, ValidationError, WEAK_PASSWORD_MESSAGE};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

const EMAIL_EXISTS_MESSAGE: &str = "Email already exists.";
const BUSY_MESSAGE: &str = "Please wait for the current request to finish.";

/// Every way the signup flow can fail.
///
/// All variants are recoverable by the user; none triggers an automatic retry.
#[derive(Error, Debug)]
pub enum SignupError {
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

    #[error("Email already registered {location}")]
    EmailExists { location: ErrorLocation },

    #[error("Server rejected request: {message} {location}")]
    ServerRejected {
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport failure: {message} {location}")]
    TransportFailure {
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity provider failure: {message} {location}")]
    ProviderFailure {
        message: String,
        location: ErrorLocation,
    },

    #[error("User record store failure: {message} {location}")]
    StoreFailure {
        message: String,
        location: ErrorLocation,
    },

    #[error("Request already in flight {location}")]
    Busy { location: ErrorLocation },

    #[error("Invalid signup state: {source} {location}")]
    InvalidState {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },
}

impl SignupError {
    #[track_caller]
    pub fn empty_field(field: FormField) -> Self {
        Self::EmptyField {
            field,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn email_exists() -> Self {
        Self::EmailExists {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn server_rejected(message: impl Into<String>) -> Self {
        Self::ServerRejected {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportFailure {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn provider(message: impl Into<String>) -> Self {
        Self::ProviderFailure {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreFailure {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn busy() -> Self {
        Self::Busy {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The single string shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyField { field, .. } => field.empty_message(),
            Self::InvalidFormat { field, .. } => field.invalid_message(),
            Self::WeakPassword { .. } => String::from(WEAK_PASSWORD_MESSAGE),
            Self::EmailExists { .. } => String::from(EMAIL_EXISTS_MESSAGE),
            Self::ServerRejected { message, .. }
            | Self::TransportFailure { message, .. }
            | Self::ProviderFailure { message, .. }
            | Self::StoreFailure { message, .. } => message.clone(),
            Self::Busy { .. } => String::from(BUSY_MESSAGE),
            Self::InvalidState { source, .. } => source.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyField { .. } => "EMPTY_FIELD",
            Self::InvalidFormat { .. } => "INVALID_FORMAT",
            Self::WeakPassword { .. } => "WEAK_PASSWORD",
            Self::EmailExists { .. } => "EMAIL_EXISTS",
            Self::ServerRejected { .. } => "SERVER_REJECTED",
            Self::TransportFailure { .. } => "TRANSPORT_FAILURE",
            Self::ProviderFailure { .. } => "PROVIDER_FAILURE",
            Self::StoreFailure { .. } => "STORE_FAILURE",
            Self::Busy { .. } => "BUSY",
            Self::InvalidState { .. } => "INVALID_STATE",
        }
    }

    /// No amount of retrying the same email succeeds, so the session starts over.
    pub fn returns_to_idle(&self) -> bool {
        matches!(self, Self::EmailExists { .. })
    }
}

impl From<ValidationError> for SignupError {
    #[track_caller]
    fn from(err: ValidationError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match err {
            ValidationError::EmptyField { field, .. } => Self::EmptyField { field, location },
            ValidationError::InvalidFormat { field, .. } => Self::InvalidFormat { field, location },
            ValidationError::WeakPassword { .. } => Self::WeakPassword { location },
        }
    }
}

impl From<CoreError> for SignupError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::InvalidState {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for SignupError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}

impl From<dl_db::DbError> for SignupError {
    #[track_caller]
    fn from(err: dl_db::DbError) -> Self {
        let message = match err {
            dl_db::DbError::Sqlx { source, .. } => source.to_string(),
            dl_db::DbError::Migration { message, .. } => message,
        };
        Self::store(message)
    }
}

pub type Result<T> = std::result::Result<T, SignupError>;
