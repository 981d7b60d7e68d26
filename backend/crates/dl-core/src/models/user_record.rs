use crate::{ProviderId, generate_keywords};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Persisted profile row, keyed by the provider-assigned `uid`.
///
/// `email` is not unique at the storage level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub email: String,
    #[serde(rename = "photoURL", default)]
    pub photo_url: String,
    pub uid: String,
    #[serde(rename = "providerId")]
    pub provider_id: ProviderId,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
}

impl UserRecord {
    /// Profile for an account created with email and password.
    pub fn for_password_signup(username: &str, email: &str, uid: &str) -> Self {
        Self {
            display_name: username.to_string(),
            email: email.to_string(),
            photo_url: String::new(),
            uid: uid.to_string(),
            provider_id: ProviderId::Password,
            keywords: generate_keywords(username),
        }
    }
}
