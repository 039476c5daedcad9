//! Shared wire types for the marketplace realtime channel.
//!
//! These types are exchanged between `market-server` and seller dashboard
//! clients, over both in-process (memory) and network (TCP) transports.

pub mod message;

pub use message::{
    BusMessage, EventType, NotificationKind, NotificationPayload, RegisterPayload,
    ResponsePayload, Role,
};
