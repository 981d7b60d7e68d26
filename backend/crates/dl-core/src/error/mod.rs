pub mod validation_error;

// -------------------------------------------------------------------------- //

use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid form field: {value} {location}")]
    InvalidFormField {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid signup phase: {value} {location}")]
    InvalidSignupPhase {
        value: String,
        location: ErrorLocation,
    },

    #[error("Illegal signup transition: cannot {action} while {from} {location}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
