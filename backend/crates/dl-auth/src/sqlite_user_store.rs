use crate::{AuthSession, Result as SignupResult, UserRecordStore};

use dl_core::UserRecord;
use dl_db::UserRecordRepository;

use async_trait::async_trait;

#[async_trait]
impl UserRecordStore for UserRecordRepository {
    async fn email_exists(&self, email: &str) -> SignupResult<bool> {
        Ok(self.exists_by_email(email).await?)
    }

    async fn put(&self, _session: &AuthSession, record: &UserRecord) -> SignupResult<()> {
        self.upsert(record).await?;
        Ok(())
    }
}
