pub mod fixtures;
pub mod test_db;

pub use fixtures::user_record;
pub use test_db::create_test_pool;
