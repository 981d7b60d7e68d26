use crate::{
    AuthSession, Compensation, IdentityProvider, Orphan, Result as SignupResult, SignupBackend,
    SignupError, UniquenessChecker, UserRecordStore,
};

use dl_core::{FormField, SignupForm, SignupValidator, UserRecord};

use std::sync::Arc;

use log::{debug, info, warn};

/// Runs the multi-step registration after the user entered the emailed code.
///
/// Steps, each aborting the rest on failure:
/// 1. email uniqueness pre-check
/// 2. backend signup
/// 3. identity creation at the provider
/// 4. user record write keyed by the new uid
///
/// Completed steps are not rolled back; orphans from steps 2 and 3 are handed
/// to the configured [`Compensation`].
#[derive(Clone)]
pub struct RegistrationCommitter {
    uniqueness: UniquenessChecker,
    backend: Arc<dyn SignupBackend>,
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn UserRecordStore>,
    compensation: Arc<dyn Compensation>,
}

impl RegistrationCommitter {
    pub fn new(
        backend: Arc<dyn SignupBackend>,
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn UserRecordStore>,
        compensation: Arc<dyn Compensation>,
    ) -> Self {
        Self {
            uniqueness: UniquenessChecker::new(Arc::clone(&store)),
            backend,
            provider,
            store,
            compensation,
        }
    }

    pub async fn commit(
        &self,
        session: &mut AuthSession,
        form: &SignupForm,
    ) -> SignupResult<UserRecord> {
        Self::check_preconditions(form)?;

        // The code itself is only shape-checked here; the backend owns the comparison.
        if session.verification_requested_for() != Some(form.email.as_str()) {
            warn!(
                "Committing {} without a verification request in this session",
                form.email
            );
        }

        debug!("Step 1/4: uniqueness check for {}", form.email);
        if self.uniqueness.is_email_taken(&form.email).await? {
            return Err(SignupError::email_exists());
        }

        debug!("Step 2/4: backend signup for {}", form.email);
        self.backend.signup(form).await?;

        debug!("Step 3/4: creating identity for {}", form.email);
        let identity = match self.provider.create_user(&form.email, &form.password).await {
            Ok(identity) => identity,
            Err(err) => {
                self.compensate(Orphan::BackendSignup {
                    email: form.email.clone(),
                })
                .await;
                return Err(err);
            }
        };
        let record = UserRecord::for_password_signup(&form.username, &form.email, &identity.uid);
        session.sign_in(identity);

        debug!("Step 4/4: writing user record uid={}", record.uid);
        if let Err(err) = self.store.put(session, &record).await {
            if let Some(identity) = session.current_user().cloned()
                && self.compensate(Orphan::Identity(identity)).await
            {
                session.sign_out();
            }
            return Err(err);
        }

        info!("Registered {} as uid={}", record.email, record.uid);
        Ok(record)
    }

    #[track_caller]
    fn check_preconditions(form: &SignupForm) -> SignupResult<()> {
        if let Some(field) = form.missing_credential() {
            return Err(SignupError::empty_field(field));
        }
        if !form.has_otp() {
            return Err(SignupError::empty_field(FormField::Otp));
        }
        SignupValidator::validate_otp(&form.otp)?;
        Ok(())
    }

    /// A failing hook is logged; the caller always sees the step's own error.
    async fn compensate(&self, orphan: Orphan) -> bool {
        match self.compensation.compensate(&orphan).await {
            Ok(retracted) => retracted,
            Err(err) => {
                warn!("Compensation for {orphan} failed: {err}");
                false
            }
        }
    }
}
