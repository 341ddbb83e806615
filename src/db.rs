//! Database module
//!
//! Schema bootstrap and connectivity utilities.

use sqlx::PgPool;

/// DDL for the events table. IF NOT EXISTS keeps the bootstrap idempotent and
/// safe to run from several process instances at once.
const CREATE_EVENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS events (
    id            BIGSERIAL PRIMARY KEY,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT now(),
    event_type    TEXT NOT NULL CHECK (event_type IN ('botado','permitido')),
    sensor_value  INT,
    device_id     TEXT,
    lane_id       TEXT
)
"#;

const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS events_created_at_idx ON events (created_at DESC)";

const CREATE_TYPE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS events_type_idx ON events (event_type)";

/// Create the events table and its indexes if absent.
///
/// Runs before the listener binds; a failure here aborts startup.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_EVENTS_TABLE).execute(pool).await?;
    sqlx::query(CREATE_CREATED_AT_INDEX).execute(pool).await?;
    sqlx::query(CREATE_TYPE_INDEX).execute(pool).await?;

    tracing::info!("events schema ready");
    Ok(())
}

/// Simple connectivity check
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}
