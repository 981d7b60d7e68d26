use crate::api_config::is_http_url;
use crate::{ConfigError, ConfigErrorResult, DEFAULT_DATABASE_URL, DEFAULT_IDENTITY_TOOLKIT_URL};

use serde::Deserialize;

/// Identity Toolkit and Realtime Database endpoints of the Firebase project
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FirebaseConfig {
    /// Web API key. Required for credential creation; never logged.
    pub api_key: Option<String>,
    pub identity_toolkit_url: String,
    pub database_url: String,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            identity_toolkit_url: String::from(DEFAULT_IDENTITY_TOOLKIT_URL),
            database_url: String::from(DEFAULT_DATABASE_URL),
        }
    }
}

impl FirebaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if let Some(key) = &self.api_key
            && key.trim().is_empty()
        {
            return Err(ConfigError::firebase("firebase.api_key cannot be blank"));
        }

        if !is_http_url(&self.identity_toolkit_url) {
            return Err(ConfigError::firebase(format!(
                "firebase.identity_toolkit_url must be an http(s) URL, got '{}'",
                self.identity_toolkit_url
            )));
        }

        if !is_http_url(&self.database_url) {
            return Err(ConfigError::firebase(format!(
                "firebase.database_url must be an http(s) URL, got '{}'",
                self.database_url
            )));
        }

        Ok(())
    }

    /// API key, or an error naming how to provide one.
    #[track_caller]
    pub fn require_api_key(&self) -> ConfigErrorResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            ConfigError::firebase("firebase.api_key is not set (use DL_FIREBASE_API_KEY)")
        })
    }
}
