//! Store module
//!
//! Persistence layer for sensor events.
//! Handles inserting and aggregating events in PostgreSQL.

mod error;
mod repository;

pub use error::EventStoreError;
pub use repository::{EventStats, EventStore, StoredEvent, RECENT_EVENTS_LIMIT};
