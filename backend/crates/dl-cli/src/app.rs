use crate::commands::{Commands, Credentials};
use crate::error::{CliError, Result as CliErrorResult};
use crate::{logger, services};

use dl_auth::{AuthSession, SignupController, VerificationRequestor};
use dl_config::Config;
use dl_core::{FormField, SignupForm, SignupPhase, SignupValidator};

use log::info;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

const MAX_OTP_ATTEMPTS: u32 = 3;
const REGISTRATION_COMPLETE: &str = "Registration complete, please sign in.";

const CREDENTIAL_FIELDS: [FormField; 3] =
    [FormField::Username, FormField::Email, FormField::Password];

pub async fn run(command: Commands) -> CliErrorResult<()> {
    match command {
        Commands::Validate { field, value } => validate(field, &value),
        Commands::VerifyEmail { credentials } => {
            let config = startup()?;
            verify_email(&config, &credentials).await
        }
        Commands::Signup { credentials, otp } => {
            let config = startup()?;
            let mut controller = services::signup_controller(&config).await?;
            match otp {
                Some(code) => {
                    let mut no_input = tokio::io::empty();
                    signup(&mut controller, &credentials, Some(&code), &mut no_input).await?
                }
                None => {
                    let mut stdin = BufReader::new(tokio::io::stdin());
                    signup(&mut controller, &credentials, None, &mut stdin).await?
                }
            }
            println!("{REGISTRATION_COMPLETE}");
            Ok(())
        }
    }
}

fn startup() -> CliErrorResult<Config> {
    let config = Config::load()?;
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.log_file_path()?.as_deref(),
        config.logging.colored,
    )?;

    info!("Starting devlearn v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();
    Ok(config)
}

pub fn validate(field: FormField, value: &str) -> CliErrorResult<()> {
    SignupValidator::validate(field, value.trim())
        .map_err(|e| CliError::invalid(e.user_message()))?;
    println!("ok");
    Ok(())
}

/// First failing credential field, as the form would show it.
fn check_credentials(form: &SignupForm) -> CliErrorResult<()> {
    for field in CREDENTIAL_FIELDS {
        SignupValidator::validate_field(field, form)
            .map_err(|e| CliError::invalid(e.user_message()))?;
    }
    Ok(())
}

async fn verify_email(config: &Config, credentials: &Credentials) -> CliErrorResult<()> {
    let form = SignupForm::new(
        &credentials.username,
        &credentials.email,
        &credentials.password,
    );
    check_credentials(&form)?;

    let requestor = VerificationRequestor::new(services::signup_backend(config)?);
    requestor
        .request_verification(&mut AuthSession::new(), &form)
        .await?;

    println!("Verification code sent to {}.", form.email);
    Ok(())
}

/// Drive the controller through verification and registration.
///
/// With `otp`, the code comes from an earlier `verify-email` run and no new
/// one is requested, since that would invalidate it. Without, a code is
/// requested and read line by line from `input`; a rejected code may be
/// re-entered while the controller still awaits one.
pub async fn signup<R>(
    controller: &mut SignupController,
    credentials: &Credentials,
    otp: Option<&str>,
    input: &mut R,
) -> CliErrorResult<()>
where
    R: AsyncBufRead + Unpin,
{
    controller.handle_change(FormField::Username, &credentials.username);
    controller.handle_change(FormField::Email, &credentials.email);
    controller.handle_change(FormField::Password, &credentials.password);
    check_credentials(controller.form())?;

    if let Some(code) = otp {
        controller.resume_awaiting_otp()?;
        controller.handle_change(FormField::Otp, code);
        controller.submit().await?;
        return Ok(());
    }

    controller.verify_email().await?;

    let mut attempt = 1;
    loop {
        eprint!("Enter the code sent to {}: ", controller.form().email);
        let code = read_otp(input).await?;
        controller.handle_change(FormField::Otp, &code);

        match controller.submit().await {
            Ok(_) => return Ok(()),
            Err(err)
                if attempt < MAX_OTP_ATTEMPTS && controller.phase() == SignupPhase::AwaitingOtp =>
            {
                eprintln!("{}", err.user_message());
                attempt += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// One trimmed line of input.
pub async fn read_otp<R>(input: &mut R) -> CliErrorResult<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .await
        .map_err(|e| CliError::input(e.to_string()))?;
    if read == 0 {
        return Err(CliError::input("no input"));
    }
    Ok(line.trim().to_string())
}
