use crate::FormField;

use serde::{Deserialize, Serialize};

/// Transient form state owned by one signup session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "verify")]
    pub otp: String,
}

impl SignupForm {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        let mut form = Self::default();
        form.set(FormField::Username, username);
        form.set(FormField::Email, email);
        form.set(FormField::Password, password);
        form
    }

    /// Store a field value, trimmed.
    pub fn set(&mut self, field: FormField, value: &str) {
        let value = value.trim().to_string();
        match field {
            FormField::Username => self.username = value,
            FormField::Email => self.email = value,
            FormField::Password => self.password = value,
            FormField::Otp => self.otp = value,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Username => &self.username,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
            FormField::Otp => &self.otp,
        }
    }

    /// First of username/email/password that is still empty.
    pub fn missing_credential(&self) -> Option<FormField> {
        [FormField::Username, FormField::Email, FormField::Password]
            .into_iter()
            .find(|field| self.get(*field).is_empty())
    }

    pub fn has_otp(&self) -> bool {
        !self.otp.is_empty()
    }
}
