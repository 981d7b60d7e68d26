use crate::{ConfigError, ConfigErrorResult, DEFAULT_SQLITE_FILENAME};

use std::str::FromStr;

use serde::Deserialize;

/// Where user records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Firebase Realtime Database over REST
    #[default]
    Firebase,
    /// Local SQLite file
    Sqlite,
    /// In-process, lost on exit
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Firebase => "firebase",
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    #[track_caller]
    fn from_str(s: &str) -> ConfigErrorResult<Self> {
        match s.to_lowercase().as_str() {
            "firebase" => Ok(Self::Firebase),
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::store(format!("unknown store backend '{s}'"))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Relative to the config directory
    pub sqlite_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            sqlite_path: String::from(DEFAULT_SQLITE_FILENAME),
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let path = std::path::Path::new(&self.sqlite_path);
        if self.sqlite_path.is_empty() || path.is_absolute() || self.sqlite_path.contains("..") {
            return Err(ConfigError::store(
                "store.sqlite_path must be relative and cannot contain '..'",
            ));
        }
        Ok(())
    }
}
