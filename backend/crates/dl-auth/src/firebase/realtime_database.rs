use super::error_message;
use crate::{AuthSession, Result as SignupResult, SignupError, UserRecordStore};

use dl_core::UserRecord;

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client as ReqwestClient, RequestBuilder};
use serde_json::Value;

const USERS_PATH: &str = "users";

/// User records under `/users/{uid}` in a Firebase Realtime Database, over REST.
///
/// The email lookup relies on an `.indexOn: ["email"]` rule for `/users`.
pub struct FirebaseUserStore {
    database_url: String,
    client: ReqwestClient,
}

impl FirebaseUserStore {
    pub fn new(database_url: &str, timeout: Duration) -> SignupResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(Self {
            database_url: database_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn execute(&self, req: RequestBuilder) -> SignupResult<Value> {
        let response = req
            .send()
            .await
            .map_err(|e| SignupError::store(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SignupError::store(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&text, status.as_str());
            warn!("Realtime database returned {status}: {message}");
            return Err(SignupError::store(message));
        }

        serde_json::from_str(&text).map_err(|e| SignupError::store(e.to_string()))
    }
}

#[async_trait]
impl UserRecordStore for FirebaseUserStore {
    async fn email_exists(&self, email: &str) -> SignupResult<bool> {
        let url = format!("{}/{}.json", self.database_url, USERS_PATH);
        debug!("GET {url} (email query)");

        // Query parameters are JSON literals
        let order_by = Value::from("email").to_string();
        let equal_to = Value::from(email).to_string();
        let req = self
            .client
            .get(&url)
            .query(&[("orderBy", order_by.as_str()), ("equalTo", equal_to.as_str())]);

        match self.execute(req).await? {
            Value::Null => Ok(false),
            Value::Object(matches) => Ok(!matches.is_empty()),
            other => Err(SignupError::store(format!(
                "unexpected query result: {other}"
            ))),
        }
    }

    async fn put(&self, session: &AuthSession, record: &UserRecord) -> SignupResult<()> {
        let url = format!("{}/{}/{}.json", self.database_url, USERS_PATH, record.uid);
        debug!("PUT {url}");

        let mut req = self.client.put(&url).json(record);
        if let Some(token) = session.current_user().and_then(|u| u.id_token.as_deref()) {
            req = req.query(&[("auth", token)]);
        }

        self.execute(req).await?;
        Ok(())
    }
}
