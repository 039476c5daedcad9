//! Realtime channel message types
//!
//! A connection starts with a `Register` frame that binds the connection to a
//! seller identity. After that the server pushes `Notification` frames and
//! answers requests with `Response` frames.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use uuid::Uuid;

pub mod payload;
pub use payload::*;

/// Realtime channel event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Connection registration (seller identity + role)
    Register = 0,
    /// Notification push (server -> client)
    Notification = 1,
    /// Request response
    Response = 2,
}

impl TryFrom<u8> for EventType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EventType::Register),
            1 => Ok(EventType::Notification),
            2 => Ok(EventType::Response),
            _ => Err(()),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Register => write!(f, "register"),
            EventType::Notification => write!(f, "notification"),
            EventType::Response => write!(f, "response"),
        }
    }
}

/// Framed message body carried over a transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusMessage {
    pub request_id: Uuid,
    pub event_type: EventType,
    pub correlation_id: Option<Uuid>,
    pub payload: Vec<u8>,
}

impl BusMessage {
    pub fn new(event_type: EventType, payload: Vec<u8>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            event_type,
            correlation_id: None,
            payload,
        }
    }

    /// Set correlation ID (links a response to the originating request)
    pub fn with_correlation_id(mut self, id: Uuid) -> Self {
        self.correlation_id = Some(id);
        self
    }

    /// Create a registration message
    pub fn register(payload: &RegisterPayload) -> Self {
        Self::new(
            EventType::Register,
            serde_json::to_vec(payload).expect("Failed to serialize register payload"),
        )
    }

    /// Create a notification push message
    pub fn notification(payload: &NotificationPayload) -> Self {
        Self::new(
            EventType::Notification,
            serde_json::to_vec(payload).expect("Failed to serialize notification payload"),
        )
    }

    /// Create a response message
    pub fn response(payload: &ResponsePayload) -> Self {
        Self::new(
            EventType::Response,
            serde_json::to_vec(payload).expect("Failed to serialize response payload"),
        )
    }

    /// Parse the JSON payload into a typed value
    pub fn parse_payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}
