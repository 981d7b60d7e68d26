pub mod form_field;
pub mod provider_id;
pub mod signup_form;
pub mod signup_phase;
pub mod user_record;
