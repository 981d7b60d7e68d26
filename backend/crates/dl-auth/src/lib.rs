pub mod backend_client;
pub mod compensation;
pub mod error;
pub mod firebase;
pub mod identity_provider;
pub mod memory_user_store;
pub mod registration_committer;
pub mod session;
pub mod signup_backend;
pub mod signup_controller;
pub mod sqlite_user_store;
pub mod uniqueness_checker;
pub mod user_record_store;
pub mod verification_requestor;

pub use backend_client::BackendClient;
pub use compensation::{Compensation, LeaveOrphaned, Orphan, RetractIdentity};
pub use error::{Result, SignupError};
pub use firebase::identity_toolkit::FirebaseIdentityProvider;
pub use firebase::realtime_database::FirebaseUserStore;
pub use identity_provider::IdentityProvider;
pub use memory_user_store::MemoryUserStore;
pub use registration_committer::RegistrationCommitter;
pub use session::{AuthIdentity, AuthSession};
pub use signup_backend::SignupBackend;
pub use signup_controller::{SIGN_IN_ROUTE, SignupController};
pub use uniqueness_checker::UniquenessChecker;
pub use user_record_store::UserRecordStore;
pub use verification_requestor::VerificationRequestor;

#[cfg(test)]
mod tests;
