use crate::{AuthSession, Result as SignupResult};

use dl_core::UserRecord;

use async_trait::async_trait;

/// Shared store of user profiles.
///
/// The email lookup and the write are independent operations; nothing links
/// them transactionally.
#[async_trait]
pub trait UserRecordStore: Send + Sync {
    /// True iff at least one record carries `email` at call time.
    async fn email_exists(&self, email: &str) -> SignupResult<bool>;

    /// Write `record` under its uid, acting as the session's current user.
    async fn put(&self, session: &AuthSession, record: &UserRecord) -> SignupResult<()>;
}
