pub mod error;
pub mod keywords;
pub mod models;
pub mod validator;

pub use error::validation_error::{
    Result as ValidationResult, ValidationError, WEAK_PASSWORD_MESSAGE,
};
pub use error::{CoreError, Result};
pub use keywords::generate_keywords;
pub use models::form_field::FormField;
pub use models::provider_id::ProviderId;
pub use models::signup_form::SignupForm;
pub use models::signup_phase::SignupPhase;
pub use models::user_record::UserRecord;
pub use validator::SignupValidator;
