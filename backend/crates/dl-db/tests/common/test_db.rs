use sqlx::SqlitePool;

/// In-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    dl_db::open_in_memory()
        .await
        .expect("Failed to create test pool")
}
