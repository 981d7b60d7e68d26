use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Where a signup session stands.
///
/// ```text
/// Idle -> VerifyingEmail -> AwaitingOtp -> Submitting -> Success
///
/// VerifyingEmail -> Idle         request failed
/// VerifyingEmail -> AwaitingOtp  re-request failed, earlier code still valid
/// Idle           -> AwaitingOtp  code mailed by an earlier request
/// Submitting     -> AwaitingOtp  registration failed
/// Submitting     -> Idle         EmailExists
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SignupPhase {
    #[default]
    Idle,
    VerifyingEmail,
    AwaitingOtp,
    Submitting,
    Success,
}

impl SignupPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::VerifyingEmail => "verifying_email",
            Self::AwaitingOtp => "awaiting_otp",
            Self::Submitting => "submitting",
            Self::Success => "success",
        }
    }

    /// The verification email may be (re-)requested before registration completes.
    #[track_caller]
    pub fn begin_verification(self) -> CoreErrorResult<Self> {
        match self {
            Self::Idle | Self::AwaitingOtp => Ok(Self::VerifyingEmail),
            _ => Err(Self::illegal(self, "request verification")),
        }
    }

    #[track_caller]
    pub fn verification_succeeded(self) -> CoreErrorResult<Self> {
        match self {
            Self::VerifyingEmail => Ok(Self::AwaitingOtp),
            _ => Err(Self::illegal(self, "complete verification")),
        }
    }

    /// `resume_code_entry` is set when the failed request was a re-request
    /// made while a previously mailed code was still being awaited.
    #[track_caller]
    pub fn verification_failed(self, resume_code_entry: bool) -> CoreErrorResult<Self> {
        match self {
            Self::VerifyingEmail if resume_code_entry => Ok(Self::AwaitingOtp),
            Self::VerifyingEmail => Ok(Self::Idle),
            _ => Err(Self::illegal(self, "fail verification")),
        }
    }

    /// Enter code entry for a code mailed by an earlier request.
    #[track_caller]
    pub fn resume_awaiting_otp(self) -> CoreErrorResult<Self> {
        match self {
            Self::Idle => Ok(Self::AwaitingOtp),
            _ => Err(Self::illegal(self, "resume code entry")),
        }
    }

    #[track_caller]
    pub fn begin_submit(self) -> CoreErrorResult<Self> {
        match self {
            Self::AwaitingOtp => Ok(Self::Submitting),
            _ => Err(Self::illegal(self, "submit")),
        }
    }

    #[track_caller]
    pub fn submit_succeeded(self) -> CoreErrorResult<Self> {
        match self {
            Self::Submitting => Ok(Self::Success),
            _ => Err(Self::illegal(self, "complete submit")),
        }
    }

    /// `returns_to_idle` is set for failures no retry with the same email can fix.
    #[track_caller]
    pub fn submit_failed(self, returns_to_idle: bool) -> CoreErrorResult<Self> {
        match self {
            Self::Submitting if returns_to_idle => Ok(Self::Idle),
            Self::Submitting => Ok(Self::AwaitingOtp),
            _ => Err(Self::illegal(self, "fail submit")),
        }
    }

    #[track_caller]
    fn illegal(from: Self, action: &'static str) -> CoreError {
        CoreError::InvalidTransition {
            from: from.as_str(),
            action,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl FromStr for SignupPhase {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "idle" => Ok(Self::Idle),
            "verifying_email" => Ok(Self::VerifyingEmail),
            "awaiting_otp" => Ok(Self::AwaitingOtp),
            "submitting" => Ok(Self::Submitting),
            "success" => Ok(Self::Success),
            _ => Err(CoreError::InvalidSignupPhase {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for SignupPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
