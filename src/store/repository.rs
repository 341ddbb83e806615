//! Event Repository
//!
//! Inserts and aggregates sensor events. Each call checks a connection out of
//! the pool for the duration of its queries and returns it on every exit path.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::domain::{EventType, NewEvent};

use super::EventStoreError;

/// How many rows `stats` returns in `last_events`.
pub const RECENT_EVENTS_LIMIT: i64 = 50;

/// Stored event row from the database
#[derive(Debug, Clone, Serialize)]
pub struct StoredEvent {
    pub id: i64,
    pub event_type: EventType,
    pub sensor_value: Option<i32>,
    pub device_id: Option<String>,
    pub lane_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregate view served to the dashboard.
#[derive(Debug)]
pub struct EventStats {
    pub botados: i64,
    pub permitidos: i64,
    pub last_events: Vec<StoredEvent>,
}

/// Event store for persisting and aggregating sensor events
#[derive(Debug, Clone)]
pub struct EventStore {
    pool: PgPool,
}

impl EventStore {
    /// Create a new EventStore with a database pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert one event, returning its generated id and creation timestamp.
    ///
    /// One atomic row per call; the timestamp is assigned by the database.
    pub async fn record(
        &self,
        event: &NewEvent,
    ) -> Result<(i64, DateTime<Utc>), EventStoreError> {
        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO events (event_type, sensor_value, device_id, lane_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at
            "#,
        )
        .bind(event.event_type.as_str())
        .bind(event.sensor_value)
        .bind(&event.device_id)
        .bind(&event.lane_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((id, created_at))
    }

    /// Count persisted rows of one event type.
    pub async fn count_by_type(&self, event_type: EventType) -> Result<i64, EventStoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE event_type = $1")
                .bind(event_type.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// The most recent events, newest first, capped at `limit` rows.
    pub async fn recent(&self, limit: i64) -> Result<Vec<StoredEvent>, EventStoreError> {
        let rows: Vec<(i64, String, Option<i32>, Option<String>, Option<String>, DateTime<Utc>)> =
            sqlx::query_as(
                r#"
                SELECT id, event_type, sensor_value, device_id, lane_id, created_at
                FROM events
                ORDER BY created_at DESC
                LIMIT $1
                "#,
            )
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|(id, raw_type, sensor_value, device_id, lane_id, created_at)| {
                let event_type = raw_type
                    .parse::<EventType>()
                    .map_err(|_| EventStoreError::UnknownEventType(raw_type))?;
                Ok(StoredEvent {
                    id,
                    event_type,
                    sensor_value,
                    device_id,
                    lane_id,
                    created_at,
                })
            })
            .collect()
    }

    /// Per-type totals plus the most recent events for the dashboard.
    pub async fn stats(&self) -> Result<EventStats, EventStoreError> {
        let botados = self.count_by_type(EventType::Botado).await?;
        let permitidos = self.count_by_type(EventType::Permitido).await?;
        let last_events = self.recent(RECENT_EVENTS_LIMIT).await?;

        Ok(EventStats {
            botados,
            permitidos,
            last_events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_event_serializes_all_fields() {
        let event = StoredEvent {
            id: 7,
            event_type: EventType::Botado,
            sensor_value: Some(512),
            device_id: Some("esp32-01".to_string()),
            lane_id: None,
            created_at: "2026-08-07T12:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["event_type"], "botado");
        assert_eq!(json["sensor_value"], 512);
        assert_eq!(json["device_id"], "esp32-01");
        assert_eq!(json["lane_id"], serde_json::Value::Null);
        assert_eq!(json["created_at"], "2026-08-07T12:00:00Z");
    }
}
