
use dl_auth::{
    AuthIdentity, IdentityProvider, LeaveOrphaned, MemoryUserStore, RegistrationCommitter,
    Result as SignupResult, SignupBackend, SignupController, SignupError, VerificationRequestor,
};
use dl_core::SignupForm;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

pub(crate) const GOOD_CODE: &str = "123456";

/// Backend accepting a single code.
#[derive(Default)]
pub(crate) struct CodeCheckingBackend {
    pub(crate) signups: Mutex<Vec<String>>,
}

#[async_trait]
impl SignupBackend for CodeCheckingBackend {
    async fn verify_email(&self, _form: &SignupForm) -> SignupResult<()> {
        Ok(())
    }

    async fn signup(&self, form: &SignupForm) -> SignupResult<()> {
        self.signups.lock().unwrap().push(form.otp.clone());
        if form.otp == GOOD_CODE {
            Ok(())
        } else {
            Err(SignupError::server_rejected("Invalid OTP"))
        }
    }
}

/// Backend mailing a fresh code per verification request; only the latest
/// one is accepted.
#[derive(Default)]
pub(crate) struct RotatingCodeBackend {
    pub(crate) issued: Mutex<Vec<String>>,
}

#[async_trait]
impl SignupBackend for RotatingCodeBackend {
    async fn verify_email(&self, _form: &SignupForm) -> SignupResult<()> {
        let mut issued = self.issued.lock().unwrap();
        let code = format!("{:06}", issued.len() + 1);
        issued.push(code);
        Ok(())
    }

    async fn signup(&self, form: &SignupForm) -> SignupResult<()> {
        match self.issued.lock().unwrap().last() {
            Some(latest) if *latest == form.otp => Ok(()),
            _ => Err(SignupError::server_rejected("Invalid OTP")),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeProvider {
    pub(crate) deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn create_user(&self, email: &str, _password: &str) -> SignupResult<AuthIdentity> {
        Ok(AuthIdentity::new("u1", email))
    }

    async fn delete_user(&self, identity: &AuthIdentity) -> SignupResult<()> {
        self.deleted.lock().unwrap().push(identity.uid.clone());
        Ok(())
    }
}

pub(crate) fn controller<B>(backend: Arc<B>) -> SignupController
where
    B: SignupBackend + 'static,
{
    let committer = RegistrationCommitter::new(
        backend.clone(),
        Arc::new(FakeProvider::default()),
        Arc::new(MemoryUserStore::new()),
        Arc::new(LeaveOrphaned),
    );
    SignupController::new(VerificationRequestor::new(backend), committer)
}
