//! Notification Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::NotificationKind;
use surrealdb::RecordId;

/// Persisted notification
///
/// 通知先落库再尝试实时推送；接收方不在线时留待下次查询。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Receiving seller ("seller:xyz")
    pub receiver_id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    pub created_at: Option<String>,
}

/// New notification payload (internal, produced by the fan-out stage)
#[derive(Debug, Clone, Serialize)]
pub struct NotificationCreate {
    pub receiver_id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: String,
}

impl NotificationCreate {
    pub fn new(receiver_id: impl Into<String>, message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            receiver_id: receiver_id.into(),
            message: message.into(),
            kind,
            read: false,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
