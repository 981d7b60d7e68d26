pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::{open_in_memory, open_pool};
pub use error::{DbError, Result};
pub use repositories::user_record_repository::UserRecordRepository;
