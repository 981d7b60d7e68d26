/// Identity returned by the provider after credential creation.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub uid: String,
    pub email: String,
    /// Short-lived provider token authorising writes as this identity
    pub id_token: Option<String>,
}

impl AuthIdentity {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            id_token: None,
        }
    }

    pub fn with_id_token(mut self, id_token: impl Into<String>) -> Self {
        self.id_token = Some(id_token.into());
        self
    }
}

// Token stays out of logs
impl std::fmt::Debug for AuthIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthIdentity")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("id_token", &self.id_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Explicit authentication context threaded through the signup operations.
///
/// Replaces an ambient "current user" handle: whoever runs a step receives
/// the session it acts on.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    current_user: Option<AuthIdentity>,
    verification_requested_for: Option<String>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<&AuthIdentity> {
        self.current_user.as_ref()
    }

    pub fn sign_in(&mut self, identity: AuthIdentity) {
        self.current_user = Some(identity);
    }

    pub fn sign_out(&mut self) -> Option<AuthIdentity> {
        self.current_user.take()
    }

    /// Email the last verification code was requested for.
    pub fn verification_requested_for(&self) -> Option<&str> {
        self.verification_requested_for.as_deref()
    }

    pub(crate) fn record_verification_request(&mut self, email: &str) {
        self.verification_requested_for = Some(email.to_string());
    }
}
