use crate::{AuthIdentity, Result as SignupResult};

use async_trait::async_trait;

/// External service issuing credentials and unique ids.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an email/password credential. Consumes the password.
    async fn create_user(&self, email: &str, password: &str) -> SignupResult<AuthIdentity>;

    /// Remove an identity created by `create_user`.
    async fn delete_user(&self, identity: &AuthIdentity) -> SignupResult<()>;
}
