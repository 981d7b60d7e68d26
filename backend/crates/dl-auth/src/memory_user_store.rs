use crate::{AuthSession, Result as SignupResult, UserRecordStore};

use dl_core::UserRecord;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-process user records keyed by uid. Lost on drop.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    records: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, uid: &str) -> Option<UserRecord> {
        self.records.read().await.get(uid).cloned()
    }

    /// Every record carrying `email`, sorted by uid.
    pub async fn records_with_email(&self, email: &str) -> Vec<UserRecord> {
        let mut found: Vec<UserRecord> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.email == email)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.uid.cmp(&b.uid));
        found
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl UserRecordStore for MemoryUserStore {
    async fn email_exists(&self, email: &str) -> SignupResult<bool> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .any(|r| r.email == email))
    }

    async fn put(&self, _session: &AuthSession, record: &UserRecord) -> SignupResult<()> {
        self.records
            .write()
            .await
            .insert(record.uid.clone(), record.clone());
        Ok(())
    }
}
