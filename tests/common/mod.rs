//! Common test utilities

use std::sync::{Mutex, MutexGuard, OnceLock};

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

static DB_GUARD: OnceLock<Mutex<()>> = OnceLock::new();

/// Serialize tests that share the events table.
pub fn db_lock() -> MutexGuard<'static, ()> {
    DB_GUARD
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Connect to the test database, bootstrap the schema, and reset the table.
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    lane_watch::db::init_schema(&pool)
        .await
        .expect("Failed to bootstrap schema");

    // Clean up DB for fresh state
    sqlx::query("TRUNCATE TABLE events RESTART IDENTITY")
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    pool
}
