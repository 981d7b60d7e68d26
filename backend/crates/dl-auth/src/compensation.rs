use crate::{AuthIdentity, IdentityProvider, Result as SignupResult};

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};

/// State left behind when the registration saga stops part-way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Orphan {
    /// Backend accepted the signup but no identity was created
    BackendSignup { email: String },
    /// Identity exists but its profile record was never written
    Identity(AuthIdentity),
}

impl std::fmt::Display for Orphan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BackendSignup { email } => write!(f, "backend signup for {email}"),
            Self::Identity(identity) => {
                write!(f, "identity uid={} ({})", identity.uid, identity.email)
            }
        }
    }
}

/// Hook invoked for every orphan the saga produces.
#[async_trait]
pub trait Compensation: Send + Sync {
    /// Returns true when the orphan was actually retracted.
    async fn compensate(&self, orphan: &Orphan) -> SignupResult<bool>;
}

/// Report orphans and leave them for manual cleanup.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeaveOrphaned;

#[async_trait]
impl Compensation for LeaveOrphaned {
    async fn compensate(&self, orphan: &Orphan) -> SignupResult<bool> {
        warn_orphan(orphan);
        Ok(false)
    }
}

/// Delete identities whose profile write failed.
///
/// Backend signups cannot be retracted (no endpoint) and are only reported.
pub struct RetractIdentity {
    provider: Arc<dyn IdentityProvider>,
}

impl RetractIdentity {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Compensation for RetractIdentity {
    async fn compensate(&self, orphan: &Orphan) -> SignupResult<bool> {
        match orphan {
            Orphan::BackendSignup { .. } => {
                warn_orphan(orphan);
                Ok(false)
            }
            Orphan::Identity(identity) => {
                self.provider.delete_user(identity).await?;
                info!("Retracted orphaned identity uid={}", identity.uid);
                Ok(true)
            }
        }
    }
}

fn warn_orphan(orphan: &Orphan) {
    warn!("Orphaned {orphan} left behind; manual cleanup required");
}
