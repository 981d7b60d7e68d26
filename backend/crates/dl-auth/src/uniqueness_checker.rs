use crate::{Result as SignupResult, UserRecordStore};

use std::sync::Arc;

use log::debug;

/// Best-effort email uniqueness pre-check.
///
/// Not atomic with the later write: two signups for one email can both pass.
#[derive(Clone)]
pub struct UniquenessChecker {
    store: Arc<dyn UserRecordStore>,
}

impl UniquenessChecker {
    pub fn new(store: Arc<dyn UserRecordStore>) -> Self {
        Self { store }
    }

    /// Read failures propagate; they never count as "not taken".
    pub async fn is_email_taken(&self, email: &str) -> SignupResult<bool> {
        let taken = self.store.email_exists(email).await?;
        debug!("Email {email} taken: {taken}");
        Ok(taken)
    }
}
