mod api_config;
mod config;
mod error;
mod firebase_config;
mod log_level;
mod logging_config;
mod signup_config;
mod store_config;

pub use api_config::ApiConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use firebase_config::FirebaseConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use signup_config::SignupConfig;
pub use store_config::{StoreBackend, StoreConfig};

#[cfg(test)]
mod tests;

/// Environment variable naming the configuration directory
pub const CONFIG_DIR_ENV: &str = "DL_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".devlearn";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
const MIN_API_TIMEOUT_SECS: u64 = 1;
const MAX_API_TIMEOUT_SECS: u64 = 300;

const DEFAULT_IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com";
const DEFAULT_DATABASE_URL: &str =
    "https://devlearn-f2703-default-rtdb.asia-southeast1.firebasedatabase.app";

const DEFAULT_SQLITE_FILENAME: &str = "users.db";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
