//! dl-cli library
//!
//! Command definitions, service wiring and the signup driver behind the
//! `devlearn` binary.

pub mod app;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod services;

#[cfg(test)]
mod tests;

pub use app::run;
pub use cli::Cli;
pub use error::{CliError, Result as CliErrorResult};
