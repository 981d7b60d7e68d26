use crate::{
    AuthSession, RegistrationCommitter, Result as SignupResult, SignupError,
    VerificationRequestor,
};

use dl_core::{
    FormField, Result as CoreErrorResult, SignupForm, SignupPhase, SignupValidator, UserRecord,
};

use log::debug;

/// Where the user goes after a completed registration
pub const SIGN_IN_ROUTE: &str = "/sign-in";

const ALL_FIELDS_MESSAGE: &str = "Please fill out all fields.";
const ENTER_OTP_MESSAGE: &str = "Please enter OTP.";

/// Drives one signup session in response to user actions.
///
/// Holds the transient view state: form values, loading flag, the single
/// error line and whether the code-entry modal is shown. Triggers are refused
/// while `loading` is set.
pub struct SignupController {
    requestor: VerificationRequestor,
    committer: RegistrationCommitter,
    session: AuthSession,
    form: SignupForm,
    phase: SignupPhase,
    loading: bool,
    error_message: Option<String>,
    otp_modal_open: bool,
}

impl SignupController {
    pub fn new(requestor: VerificationRequestor, committer: RegistrationCommitter) -> Self {
        Self::with_session(requestor, committer, AuthSession::new())
    }

    pub fn with_session(
        requestor: VerificationRequestor,
        committer: RegistrationCommitter,
        session: AuthSession,
    ) -> Self {
        Self {
            requestor,
            committer,
            session,
            form: SignupForm::default(),
            phase: SignupPhase::default(),
            loading: false,
            error_message: None,
            otp_modal_open: false,
        }
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn phase(&self) -> SignupPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_otp_modal_open(&self) -> bool {
        self.otp_modal_open
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Route to navigate to, once registration succeeded.
    pub fn redirect_to(&self) -> Option<&'static str> {
        (self.phase == SignupPhase::Success).then_some(SIGN_IN_ROUTE)
    }

    pub fn handle_change(&mut self, field: FormField, value: &str) {
        self.form.set(field, value);
        self.error_message = None;
    }

    /// Validate the field that lost focus.
    pub fn handle_blur(&mut self, field: FormField) {
        self.error_message = SignupValidator::validate_field(field, &self.form)
            .err()
            .map(|e| e.user_message());
    }

    pub fn close_otp_modal(&mut self) {
        self.otp_modal_open = false;
    }

    /// Start over with an empty form. The session is kept.
    ///
    /// Also clears a `loading` flag left behind by a dropped in-flight call.
    pub fn reset(&mut self) {
        self.form = SignupForm::default();
        self.phase = SignupPhase::default();
        self.loading = false;
        self.error_message = None;
        self.otp_modal_open = false;
    }

    /// "Sign Up" button: request the verification email.
    ///
    /// A failed re-request leaves an already open code entry in place, since
    /// the previously mailed code is still valid.
    pub async fn verify_email(&mut self) -> SignupResult<()> {
        if self.loading {
            return Err(SignupError::busy());
        }
        self.error_message = None;

        if let Some(field) = self.form.missing_credential() {
            self.error_message = Some(String::from(ALL_FIELDS_MESSAGE));
            return Err(SignupError::empty_field(field));
        }

        let resume_code_entry = self.phase == SignupPhase::AwaitingOtp;
        self.advance(self.phase.begin_verification())?;
        self.loading = true;
        let result = self
            .requestor
            .request_verification(&mut self.session, &self.form)
            .await;
        self.loading = false;

        match result {
            Ok(()) => {
                self.phase = self.phase.verification_succeeded()?;
                self.otp_modal_open = true;
                Ok(())
            }
            Err(err) => {
                self.phase = self.phase.verification_failed(resume_code_entry)?;
                self.otp_modal_open = resume_code_entry;
                self.error_message = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Open code entry for a code mailed by an earlier request, without
    /// requesting a new one.
    ///
    /// Used when the session is rebuilt around a code the user already holds.
    pub fn resume_awaiting_otp(&mut self) -> SignupResult<()> {
        if self.loading {
            return Err(SignupError::busy());
        }
        self.error_message = None;

        if let Some(field) = self.form.missing_credential() {
            self.error_message = Some(String::from(ALL_FIELDS_MESSAGE));
            return Err(SignupError::empty_field(field));
        }

        self.advance(self.phase.resume_awaiting_otp())?;
        self.session.record_verification_request(&self.form.email);
        self.otp_modal_open = true;
        debug!("Resumed code entry for {}", self.form.email);
        Ok(())
    }

    /// "Verify OTP" button: run the registration.
    ///
    /// On failure the form is kept so the user can correct and resubmit.
    pub async fn submit(&mut self) -> SignupResult<UserRecord> {
        if self.loading {
            return Err(SignupError::busy());
        }
        self.error_message = None;

        if let Some(field) = self.form.missing_credential() {
            self.error_message = Some(String::from(ALL_FIELDS_MESSAGE));
            return Err(SignupError::empty_field(field));
        }
        if !self.form.has_otp() {
            self.error_message = Some(String::from(ENTER_OTP_MESSAGE));
            return Err(SignupError::empty_field(FormField::Otp));
        }

        self.advance(self.phase.begin_submit())?;
        self.loading = true;
        let result = self.committer.commit(&mut self.session, &self.form).await;
        self.loading = false;

        match result {
            Ok(record) => {
                self.phase = self.phase.submit_succeeded()?;
                self.otp_modal_open = false;
                self.form = SignupForm::default();
                debug!("Signup complete, redirecting to {SIGN_IN_ROUTE}");
                Ok(record)
            }
            Err(err) => {
                let to_idle = err.returns_to_idle();
                self.phase = self.phase.submit_failed(to_idle)?;
                if to_idle {
                    self.otp_modal_open = false;
                }
                self.error_message = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Apply a user-triggered transition, surfacing a refused one in the error line.
    #[track_caller]
    fn advance(&mut self, next: CoreErrorResult<SignupPhase>) -> SignupResult<()> {
        match next {
            Ok(phase) => {
                self.phase = phase;
                Ok(())
            }
            Err(source) => {
                let err = SignupError::from(source);
                self.error_message = Some(err.user_message());
                Err(err)
            }
        }
    }
}
