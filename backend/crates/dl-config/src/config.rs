use crate::{
    ApiConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, FirebaseConfig, LoggingConfig, SignupConfig, StoreConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub firebase: FirebaseConfig,
    pub store: StoreConfig,
    pub signup: SignupConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// Loading order:
    /// 1. Check for DL_CONFIG_DIR env var, else use ./.devlearn/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply DL_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: DL_CONFIG_DIR env var > ./.devlearn/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all sections. Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.api.validate()?;
        self.firebase.validate()?;
        self.store.validate()?;
        Ok(())
    }

    /// Absolute path of the SQLite user store.
    pub fn sqlite_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.store.sqlite_path))
    }

    /// Absolute path of the log file, when file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            Some(file) => Ok(Some(
                Self::config_dir()?.join(&self.logging.dir).join(file),
            )),
            None => Ok(None),
        }
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  api: {} (timeout {}s)",
            self.api.base_url, self.api.timeout_secs
        );
        info!(
            "  firebase: identity={}, database={}, api_key={}",
            self.firebase.identity_toolkit_url,
            self.firebase.database_url,
            if self.firebase.api_key.is_some() {
                "set"
            } else {
                "unset"
            }
        );
        info!(
            "  store: {} ({})",
            self.store.backend.as_str(),
            self.store.sqlite_path
        );
        info!(
            "  signup: retract_identity_on_record_failure={}",
            self.signup.retract_identity_on_record_failure
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) -> ConfigErrorResult<()> {
        // Api
        Self::apply_env_string("DL_API_BASE_URL", &mut self.api.base_url);
        Self::apply_env_parse("DL_API_TIMEOUT_SECS", &mut self.api.timeout_secs);

        // Firebase
        Self::apply_env_option_string("DL_FIREBASE_API_KEY", &mut self.firebase.api_key);
        Self::apply_env_string(
            "DL_FIREBASE_DATABASE_URL",
            &mut self.firebase.database_url,
        );
        Self::apply_env_string(
            "DL_FIREBASE_IDENTITY_TOOLKIT_URL",
            &mut self.firebase.identity_toolkit_url,
        );

        // Store
        if let Ok(val) = std::env::var("DL_STORE_BACKEND") {
            self.store.backend = val.parse()?;
        }
        Self::apply_env_string("DL_STORE_SQLITE_PATH", &mut self.store.sqlite_path);

        // Signup
        Self::apply_env_bool(
            "DL_SIGNUP_RETRACT_IDENTITY",
            &mut self.signup.retract_identity_on_record_failure,
        );

        // Logging
        Self::apply_env_parse("DL_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("DL_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("DL_LOG_FILE", &mut self.logging.file);

        Ok(())
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
