//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Validation failures for incoming events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The request carried no event_type at all.
    #[error("missing event_type: expected \"botado\" or \"permitido\"")]
    MissingEventType,

    /// The request carried an event_type outside the enum.
    #[error("invalid event_type {0:?}: expected \"botado\" or \"permitido\"")]
    InvalidEventType(String),
}
