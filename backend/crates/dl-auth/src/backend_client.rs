use crate::{Result as SignupResult, SignupBackend, SignupError};

use dl_core::SignupForm;

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::{Deserialize, Serialize};

const VERIFY_EMAIL_PATH: &str = "/api/auth/verifyemail";
const SIGNUP_PATH: &str = "/api/auth/signup";
const DEFAULT_REJECTION_MESSAGE: &str = "Request rejected by server";

/// `{success, message?}` envelope returned by both auth endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiResponse {
    success: Option<bool>,
    message: Option<String>,
}

#[derive(Serialize)]
struct VerifyEmailRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignupRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    verify: &'a str,
}

/// HTTP client for the signup backend
pub struct BackendClient {
    pub base_url: String,
    client: ReqwestClient,
}

impl BackendClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Backend URL (e.g., "http://127.0.0.1:3000")
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> SignupResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> SignupResult<()> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body: ApiResponse =
            serde_json::from_str(&text).map_err(|e| SignupError::transport(e.to_string()))?;

        Self::interpret(status, body)
    }

    /// `success: false` rejects, and so does any non-2xx status.
    #[track_caller]
    fn interpret(status: StatusCode, body: ApiResponse) -> SignupResult<()> {
        if body.success == Some(false) {
            let message = body
                .message
                .unwrap_or_else(|| String::from(DEFAULT_REJECTION_MESSAGE));
            warn!("Backend rejected request ({status}): {message}");
            return Err(SignupError::server_rejected(message));
        }

        if !status.is_success() {
            let message = body.message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map(String::from)
                    .unwrap_or_else(|| status.to_string())
            });
            warn!("Backend returned {status}: {message}");
            return Err(SignupError::server_rejected(message));
        }

        Ok(())
    }
}

#[async_trait]
impl SignupBackend for BackendClient {
    async fn verify_email(&self, form: &SignupForm) -> SignupResult<()> {
        let body = VerifyEmailRequest {
            username: &form.username,
            email: &form.email,
            password: &form.password,
        };
        self.post(VERIFY_EMAIL_PATH, &body).await
    }

    async fn signup(&self, form: &SignupForm) -> SignupResult<()> {
        let body = SignupRequest {
            username: &form.username,
            email: &form.email,
            password: &form.password,
            verify: &form.otp,
        };
        self.post(SIGNUP_PATH, &body).await
    }
}
