use crate::Result as SignupResult;

use dl_core::SignupForm;

use async_trait::async_trait;

/// Backend endpoints of the signup handshake.
#[async_trait]
pub trait SignupBackend: Send + Sync {
    /// Ask the backend to email a verification code for this signup intent.
    async fn verify_email(&self, form: &SignupForm) -> SignupResult<()>;

    /// Register the signup with the backend, passing the user-entered code as `verify`.
    async fn signup(&self, form: &SignupForm) -> SignupResult<()>;
}
