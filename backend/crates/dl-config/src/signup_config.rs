use serde::Deserialize;

/// Behaviour of the registration saga
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SignupConfig {
    /// Delete the freshly created identity when the profile write fails.
    /// Off by default: the orphan is only logged.
    pub retract_identity_on_record_failure: bool,
}
