//! Sensor Events
//!
//! A lane sensor reports each object it sees as either dropped ("botado")
//! or allowed through ("permitido").

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Outcome reported by a lane sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Object was dropped/rejected.
    Botado,
    /// Object was allowed through.
    Permitido,
}

impl EventType {
    /// Wire and database representation of this event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Botado => "botado",
            EventType::Permitido => "permitido",
        }
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "botado" => Ok(EventType::Botado),
            "permitido" => Ok(EventType::Permitido),
            other => Err(DomainError::InvalidEventType(other.to_string())),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated event ready to be persisted.
///
/// `event_type` is the only validated field; the optional metadata is passed
/// through as the sensor reported it.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub event_type: EventType,
    pub sensor_value: Option<i32>,
    pub device_id: Option<String>,
    pub lane_id: Option<String>,
}
