use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] dl_config::ConfigError),

    #[error("{0}")]
    Signup(#[from] dl_auth::SignupError),

    #[error("Database error: {0}")]
    Database(#[from] dl_db::DbError),

    #[error("{message} {location}")]
    Invalid {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to read verification code: {message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Runtime error: {message}")]
    Runtime { message: String },
}

impl CliError {
    #[track_caller]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Text printed to stderr. Signup and validation failures show the form message only.
    pub fn user_message(&self) -> String {
        match self {
            Self::Signup(err) => err.user_message(),
            Self::Invalid { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
