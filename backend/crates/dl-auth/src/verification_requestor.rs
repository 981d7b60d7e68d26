use crate::{AuthSession, Result as SignupResult, SignupBackend, SignupError};

use dl_core::SignupForm;

use std::sync::Arc;

use log::{debug, info};

/// Sends the signup intent that triggers the verification email.
#[derive(Clone)]
pub struct VerificationRequestor {
    backend: Arc<dyn SignupBackend>,
}

impl VerificationRequestor {
    pub fn new(backend: Arc<dyn SignupBackend>) -> Self {
        Self { backend }
    }

    /// One request per call; callers keep the trigger disabled while it runs.
    pub async fn request_verification(
        &self,
        session: &mut AuthSession,
        form: &SignupForm,
    ) -> SignupResult<()> {
        // Re-checked here: field validation runs per field, submit is a separate trigger
        if let Some(field) = form.missing_credential() {
            return Err(SignupError::empty_field(field));
        }

        debug!("Requesting verification email for {}", form.email);
        self.backend.verify_email(form).await?;

        session.record_verification_request(&form.email);
        info!("Verification code sent to {}", form.email);
        Ok(())
    }
}
