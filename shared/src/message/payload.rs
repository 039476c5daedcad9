use serde::{Deserialize, Serialize};
use std::fmt;

// ==================== Roles ====================

/// Connection role declared at registration time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Seller,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seller => write!(f, "seller"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

// ==================== Notification kinds ====================

/// Business notification categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A new order touched one of the seller's products
    NewOrder,
    /// A product's stock fell to or below the low-stock threshold
    LowStock,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewOrder => write!(f, "new_order"),
            Self::LowStock => write!(f, "low_stock"),
        }
    }
}

// ==================== Payloads ====================

/// Registration payload (client -> server)
///
/// Binds the underlying connection to a seller identity. A later registration
/// for the same seller replaces the earlier connection in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    /// Seller identity ("seller:xyz")
    pub seller_id: String,
    /// Declared role
    pub role: Role,
}

/// Notification payload (server -> client)
///
/// Mirrors the stored notification record; live delivery is best-effort and
/// the stored record remains the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Human-readable message
    pub message: String,
    /// Notification category
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

/// Generic response payload (server -> client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub success: bool,
    pub message: String,
}

impl ResponsePayload {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_payload_uses_camel_case() {
        let payload = RegisterPayload {
            seller_id: "seller:abc".to_string(),
            role: Role::Seller,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["sellerId"], "seller:abc");
        assert_eq!(json["role"], "seller");
    }

    #[test]
    fn notification_kind_tag_is_snake_case() {
        let payload = NotificationPayload {
            message: "New order placed for 'Lamp'".to_string(),
            kind: NotificationKind::NewOrder,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "new_order");
    }
}
