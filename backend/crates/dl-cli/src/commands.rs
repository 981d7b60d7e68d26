use dl_core::FormField;

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a single form value the way the signup form does on blur
    Validate {
        /// username, email, password or verify
        field: FormField,
        value: String,
    },

    /// Request the verification email only
    VerifyEmail {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Run the whole signup: verification email, code entry, registration
    Signup {
        #[command(flatten)]
        credentials: Credentials,

        /// Code mailed by an earlier `verify-email`; registers without sending
        /// a new one. When omitted, a code is sent and read from stdin
        #[arg(long)]
        otp: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct Credentials {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}
