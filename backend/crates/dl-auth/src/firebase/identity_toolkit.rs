use super::error_message;
use crate::{AuthIdentity, IdentityProvider, Result as SignupResult, SignupError};

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};

const SIGN_UP_PATH: &str = "/v1/accounts:signUp";
const DELETE_PATH: &str = "/v1/accounts:delete";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    id_token: &'a str,
}

/// Email/password accounts through the Identity Toolkit REST API.
pub struct FirebaseIdentityProvider {
    base_url: String,
    api_key: String,
    client: ReqwestClient,
}

impl FirebaseIdentityProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> SignupResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> SignupResult<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let code = error_message(&text, status.as_str());
            warn!("Identity provider returned {status}: {code}");
            return Err(SignupError::provider(describe(&code)));
        }

        Ok(text)
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn create_user(&self, email: &str, password: &str) -> SignupResult<AuthIdentity> {
        let body = SignUpRequest {
            email,
            password,
            return_secure_token: true,
        };
        let text = self.post(SIGN_UP_PATH, &body).await?;

        let response: SignUpResponse = serde_json::from_str(&text)
            .map_err(|e| SignupError::provider(format!("unexpected signUp response: {e}")))?;

        let mut identity = AuthIdentity::new(
            response.local_id,
            response.email.unwrap_or_else(|| email.to_string()),
        );
        identity.id_token = response.id_token;
        Ok(identity)
    }

    async fn delete_user(&self, identity: &AuthIdentity) -> SignupResult<()> {
        let Some(id_token) = identity.id_token.as_deref() else {
            return Err(SignupError::provider(format!(
                "cannot delete uid={} without an id token",
                identity.uid
            )));
        };

        self.post(DELETE_PATH, &DeleteRequest { id_token }).await?;
        Ok(())
    }
}

/// Readable text for Identity Toolkit error codes; unknown codes pass through.
fn describe(code: &str) -> String {
    let known = match code.split([' ', ':']).next().unwrap_or(code) {
        "EMAIL_EXISTS" => "The email address is already in use by another account.",
        "WEAK_PASSWORD" => "Password should be at least 6 characters.",
        "INVALID_EMAIL" => "The email address is badly formatted.",
        "OPERATION_NOT_ALLOWED" => "Password sign-in is disabled for this project.",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts, please try again later.",
        _ => return code.to_string(),
    };
    String::from(known)
}
