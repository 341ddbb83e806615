//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::domain::{DomainError, EventType, NewEvent};
use crate::error::AppError;
use crate::store::{EventStore, StoredEvent};

// =========================================================================
// Request/Response types
// =========================================================================

/// Incoming event report. Everything is optional at the wire level; the
/// handler decides what is actually required.
#[derive(Debug, Default, Deserialize)]
pub struct RecordEventRequest {
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub sensor_value: Option<i32>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub lane_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordEventResponse {
    pub ok: bool,
    pub id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub botados: i64,
    pub permitidos: i64,
    pub last_events: Vec<StoredEvent>,
}

// =========================================================================
// Router
// =========================================================================

/// Create the application router
pub fn create_router() -> Router<PgPool> {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/event", post(record_event))
        .route("/api/stats", get(get_stats))
}

// =========================================================================
// POST /api/event
// =========================================================================

/// Record one sensor event.
///
/// A missing or malformed body is read as an empty report, which then fails
/// event_type validation the same way an explicit bad value does.
async fn record_event(
    State(pool): State<PgPool>,
    body: Option<Json<RecordEventRequest>>,
) -> Result<Json<RecordEventResponse>, AppError> {
    let request = body.map(|Json(b)| b).unwrap_or_default();

    let event_type = match request.event_type.as_deref() {
        Some(raw) => raw.parse::<EventType>()?,
        None => return Err(DomainError::MissingEventType.into()),
    };

    let event = NewEvent {
        event_type,
        sensor_value: request.sensor_value,
        device_id: request.device_id,
        lane_id: request.lane_id,
    };

    let store = EventStore::new(pool);
    let (id, created_at) = store.record(&event).await?;

    Ok(Json(RecordEventResponse {
        ok: true,
        id,
        created_at,
    }))
}

// =========================================================================
// GET /api/stats
// =========================================================================

/// Per-type totals plus the most recent events, newest first.
async fn get_stats(State(pool): State<PgPool>) -> Result<Json<StatsResponse>, AppError> {
    let store = EventStore::new(pool);
    let stats = store.stats().await?;

    Ok(Json(StatsResponse {
        botados: stats.botados,
        permitidos: stats.permitidos,
        last_events: stats.last_events,
    }))
}

// =========================================================================
// GET /
// =========================================================================

/// Dashboard page. Static HTML; the page polls /api/stats from the browser.
async fn dashboard() -> Html<&'static str> {
    Html(include_str!("../../static/dashboard.html"))
}
