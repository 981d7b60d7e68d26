pub mod identity_toolkit;
pub mod realtime_database;

use serde::Deserialize;

/// Error envelope shared by Firebase REST APIs: `{"error": {"message": ...}}`
/// from Identity Toolkit, `{"error": "..."}` from the Realtime Database.
#[derive(Debug, Deserialize)]
struct FirebaseErrorBody {
    error: FirebaseErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FirebaseErrorDetail {
    Structured { message: String },
    Plain(String),
}

/// Best-effort extraction of the error message from a failed response body.
fn error_message(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<FirebaseErrorBody>(body) {
        Ok(parsed) => match parsed.error {
            FirebaseErrorDetail::Structured { message } | FirebaseErrorDetail::Plain(message) => {
                message
            }
        },
        Err(_) => String::from(fallback),
    }
}
