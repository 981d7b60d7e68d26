mod controller;

use crate::{
    AuthIdentity, AuthSession, Compensation, IdentityProvider, LeaveOrphaned, MemoryUserStore,
    Orphan, RegistrationCommitter, Result as SignupResult, SignupBackend, SignupController,
    SignupError, UserRecordStore, VerificationRequestor,
};

use dl_core::{SignupForm, UserRecord};

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Barrier;

/// Ordered record of every collaborator call, shared by all fakes of a harness.
#[derive(Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn push(&self, call: String) {
        self.0.lock().unwrap().push(call);
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn count_prefix(&self, prefix: &str) -> usize {
        self.entries()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

pub(crate) struct FakeBackend {
    calls: CallLog,
    reject_verify: Mutex<Option<String>>,
    reject_signup: Mutex<Option<String>>,
    hang: AtomicBool,
}

impl FakeBackend {
    fn new(calls: CallLog) -> Self {
        Self {
            calls,
            reject_verify: Mutex::new(None),
            reject_signup: Mutex::new(None),
            hang: AtomicBool::new(false),
        }
    }

    pub(crate) fn reject_verify(&self, message: Option<&str>) {
        *self.reject_verify.lock().unwrap() = message.map(String::from);
    }

    pub(crate) fn reject_signup(&self, message: Option<&str>) {
        *self.reject_signup.lock().unwrap() = message.map(String::from);
    }

    /// Make every following call pend forever.
    pub(crate) fn hang(&self, hang: bool) {
        self.hang.store(hang, Ordering::SeqCst);
    }
}

#[async_trait]
impl SignupBackend for FakeBackend {
    async fn verify_email(&self, form: &SignupForm) -> SignupResult<()> {
        self.calls.push(format!("backend.verify_email:{}", form.email));
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        let rejection = self.reject_verify.lock().unwrap().clone();
        match rejection {
            Some(message) => Err(SignupError::server_rejected(message)),
            None => Ok(()),
        }
    }

    async fn signup(&self, form: &SignupForm) -> SignupResult<()> {
        self.calls
            .push(format!("backend.signup:{}:{}", form.email, form.otp));
        let rejection = self.reject_signup.lock().unwrap().clone();
        match rejection {
            Some(message) => Err(SignupError::server_rejected(message)),
            None => Ok(()),
        }
    }
}

pub(crate) struct FakeProvider {
    calls: CallLog,
    uids: Mutex<VecDeque<String>>,
    fail_create: Mutex<Option<String>>,
    fail_delete: AtomicBool,
}

impl FakeProvider {
    fn new(calls: CallLog) -> Self {
        Self {
            calls,
            uids: Mutex::new(VecDeque::new()),
            fail_create: Mutex::new(None),
            fail_delete: AtomicBool::new(false),
        }
    }

    /// Uids handed out by `create_user`, in order.
    pub(crate) fn queue_uids(&self, uids: &[&str]) {
        self.uids
            .lock()
            .unwrap()
            .extend(uids.iter().map(|u| u.to_string()));
    }

    pub(crate) fn fail_create(&self, message: Option<&str>) {
        *self.fail_create.lock().unwrap() = message.map(String::from);
    }

    pub(crate) fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn create_user(&self, email: &str, _password: &str) -> SignupResult<AuthIdentity> {
        self.calls.push(format!("provider.create_user:{email}"));
        if let Some(message) = self.fail_create.lock().unwrap().clone() {
            return Err(SignupError::provider(message));
        }
        let uid = self
            .uids
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| format!("uid-{email}"));
        Ok(AuthIdentity::new(uid.clone(), email).with_id_token(format!("token-{uid}")))
    }

    async fn delete_user(&self, identity: &AuthIdentity) -> SignupResult<()> {
        self.calls
            .push(format!("provider.delete_user:{}", identity.uid));
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(SignupError::provider("delete refused"));
        }
        Ok(())
    }
}

/// Memory store with switchable failures and an optional rendezvous after
/// every email read.
pub(crate) struct FakeStore {
    pub(crate) inner: MemoryUserStore,
    calls: CallLog,
    fail_read: AtomicBool,
    fail_write: AtomicBool,
    read_barrier: Mutex<Option<Arc<Barrier>>>,
}

impl FakeStore {
    fn new(calls: CallLog) -> Self {
        Self {
            inner: MemoryUserStore::new(),
            calls,
            fail_read: AtomicBool::new(false),
            fail_write: AtomicBool::new(false),
            read_barrier: Mutex::new(None),
        }
    }

    /// Insert a record directly, bypassing the call log.
    pub(crate) async fn seed(&self, record: &UserRecord) {
        self.inner.put(&AuthSession::new(), record).await.unwrap();
    }

    pub(crate) fn fail_read(&self, fail: bool) {
        self.fail_read.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_write(&self, fail: bool) {
        self.fail_write.store(fail, Ordering::SeqCst);
    }

    /// Hold every email read until `parties` readers have arrived.
    pub(crate) fn rendezvous_after_read(&self, parties: usize) {
        *self.read_barrier.lock().unwrap() = Some(Arc::new(Barrier::new(parties)));
    }
}

#[async_trait]
impl UserRecordStore for FakeStore {
    async fn email_exists(&self, email: &str) -> SignupResult<bool> {
        self.calls.push(format!("store.email_exists:{email}"));
        if self.fail_read.load(Ordering::SeqCst) {
            return Err(SignupError::store("read refused"));
        }
        let exists = self.inner.email_exists(email).await?;
        let barrier = self.read_barrier.lock().unwrap().clone();
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }
        Ok(exists)
    }

    async fn put(&self, session: &AuthSession, record: &UserRecord) -> SignupResult<()> {
        self.calls.push(format!("store.put:{}", record.uid));
        if self.fail_write.load(Ordering::SeqCst) {
            return Err(SignupError::store("PERMISSION_DENIED"));
        }
        self.inner.put(session, record).await
    }
}

/// Compensation that records what it was handed.
#[derive(Default)]
pub(crate) struct RecordingCompensation {
    pub(crate) orphans: Mutex<Vec<Orphan>>,
}

#[async_trait]
impl Compensation for RecordingCompensation {
    async fn compensate(&self, orphan: &Orphan) -> SignupResult<bool> {
        self.orphans.lock().unwrap().push(orphan.clone());
        Ok(false)
    }
}

/// Fakes for every collaborator, sharing one call log.
pub(crate) struct Harness {
    pub(crate) calls: CallLog,
    pub(crate) backend: Arc<FakeBackend>,
    pub(crate) provider: Arc<FakeProvider>,
    pub(crate) store: Arc<FakeStore>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let calls = CallLog::default();
        Self {
            backend: Arc::new(FakeBackend::new(calls.clone())),
            provider: Arc::new(FakeProvider::new(calls.clone())),
            store: Arc::new(FakeStore::new(calls.clone())),
            calls,
        }
    }

    pub(crate) fn requestor(&self) -> VerificationRequestor {
        VerificationRequestor::new(self.backend.clone())
    }

    pub(crate) fn committer(&self) -> RegistrationCommitter {
        self.committer_with(Arc::new(LeaveOrphaned))
    }

    pub(crate) fn committer_with(&self, compensation: Arc<dyn Compensation>) -> RegistrationCommitter {
        RegistrationCommitter::new(
            self.backend.clone(),
            self.provider.clone(),
            self.store.clone(),
            compensation,
        )
    }

    pub(crate) fn controller(&self) -> SignupController {
        SignupController::new(self.requestor(), self.committer())
    }
}

pub(crate) fn filled_form(username: &str, email: &str, password: &str, otp: &str) -> SignupForm {
    let mut form = SignupForm::new(username, email, password);
    form.otp = otp.to_string();
    form
}

pub(crate) fn alice_form() -> SignupForm {
    filled_form("alice", "alice@test.com", "abc123", "123456")
}
