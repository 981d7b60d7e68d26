//! devlearn - DevLearn signup CLI
//!
//! # Examples
//!
//! ```bash
//! # Check a value the way the form does
//! devlearn validate email alice@test.com
//!
//! # Sign up, typing the emailed code when prompted
//! devlearn signup --username alice --email alice@test.com --password abc123
//! ```

use dl_cli::{Cli, CliError};

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    if let Some(dir) = &cli.config_dir {
        // SAFETY: no other threads exist yet; the runtime is built below.
        unsafe { std::env::set_var(dl_config::CONFIG_DIR_ENV, dir) };
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!(
                "Error: {}",
                CliError::Runtime {
                    message: e.to_string()
                }
            );
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(dl_cli::run(cli.command)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
