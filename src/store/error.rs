//! Store Errors
//!
//! Error types for event persistence operations.

/// Errors that can occur in the event store
#[derive(Debug, thiserror::Error)]
pub enum EventStoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A persisted row carries an event_type outside the enum. The CHECK
    /// constraint makes this unreachable unless the table was altered by hand.
    #[error("stored row has unknown event_type: {0}")]
    UnknownEventType(String),
}
