use serde::{Deserialize, Serialize};

const PASSWORD_PROVIDER: &str = "password";

/// Sign-in method that created an identity.
///
/// Stored as a bare string: `password` for email/password accounts, the
/// OAuth provider name (e.g. `google.com`) otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ProviderId {
    #[default]
    Password,
    OAuth(String),
}

impl ProviderId {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Password => PASSWORD_PROVIDER,
            Self::OAuth(name) => name,
        }
    }
}

impl From<String> for ProviderId {
    fn from(value: String) -> Self {
        if value == PASSWORD_PROVIDER {
            Self::Password
        } else {
            Self::OAuth(value)
        }
    }
}

impl From<ProviderId> for String {
    fn from(value: ProviderId) -> Self {
        match value {
            ProviderId::Password => String::from(PASSWORD_PROVIDER),
            ProviderId::OAuth(name) => name,
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
