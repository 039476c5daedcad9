//! Notification Service
//!
//! 通知的可靠性边界：先落库，再尽力实时推送。推送失败只记日志，
//! 不影响调用方；离线的接收者之后通过通知接口拉取。

pub mod presence;

pub use presence::{InMemoryPresence, PresenceEntry, PresenceRegistry};

use std::sync::Arc;

use shared::{BusMessage, NotificationKind, NotificationPayload};

use crate::db::models::{Notification, NotificationCreate};
use crate::db::repository::{NotificationRepository, RepoResult};

/// Persist-first notification emitter
#[derive(Clone)]
pub struct Notifier {
    repo: NotificationRepository,
    presence: Arc<dyn PresenceRegistry>,
}

impl Notifier {
    pub fn new(repo: NotificationRepository, presence: Arc<dyn PresenceRegistry>) -> Self {
        Self { repo, presence }
    }

    /// Store a notification, then push it to the receiver if online.
    ///
    /// Push failure never fails the call: the stored row is the source of
    /// truth, the live frame is an optimization.
    pub async fn notify(
        &self,
        receiver_id: &str,
        message: &str,
        kind: NotificationKind,
    ) -> RepoResult<Notification> {
        let stored = self
            .repo
            .create(NotificationCreate::new(receiver_id, message, kind))
            .await?;

        if let Some(entry) = self.presence.get(receiver_id) {
            let payload = NotificationPayload {
                message: message.to_string(),
                kind,
            };
            let frame = BusMessage::notification(&payload);
            match entry.transport.write_message(&frame).await {
                Ok(()) => {
                    tracing::debug!(receiver = %receiver_id, kind = %kind, "Notification pushed");
                }
                Err(e) => {
                    tracing::warn!(
                        receiver = %receiver_id,
                        kind = %kind,
                        "Notification stored but live push failed: {}",
                        e
                    );
                }
            }
        } else {
            tracing::debug!(receiver = %receiver_id, "Receiver offline, notification stored only");
        }

        Ok(stored)
    }
}
