//! Notification Repository

use super::{record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Notification, NotificationCreate};
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

const TABLE: &str = "notification";

#[derive(Clone)]
pub struct NotificationRepository {
    base: BaseRepository,
}

impl NotificationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All notifications for a receiver, newest first
    pub async fn find_by_receiver(&self, receiver_id: &str) -> RepoResult<Vec<Notification>> {
        let receiver_id = receiver_id.to_string();
        let notifications: Vec<Notification> = self
            .base
            .db()
            .query(
                "SELECT * FROM notification WHERE receiver_id = $receiver \
                 ORDER BY created_at DESC",
            )
            .bind(("receiver", receiver_id))
            .await?
            .take(0)?;
        Ok(notifications)
    }

    /// Unread notifications for a receiver, newest first
    pub async fn find_unread(&self, receiver_id: &str) -> RepoResult<Vec<Notification>> {
        let receiver_id = receiver_id.to_string();
        let notifications: Vec<Notification> = self
            .base
            .db()
            .query(
                "SELECT * FROM notification WHERE receiver_id = $receiver AND read = false \
                 ORDER BY created_at DESC",
            )
            .bind(("receiver", receiver_id))
            .await?
            .take(0)?;
        Ok(notifications)
    }

    /// Persist a new notification
    pub async fn create(&self, data: NotificationCreate) -> RepoResult<Notification> {
        let created: Option<Notification> = self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create notification".to_string()))
    }

    /// Mark a notification as read
    pub async fn mark_read(&self, id: &str) -> RepoResult<Notification> {
        let rid = record_id(TABLE, id);
        let updated: Vec<Notification> = self
            .base
            .db()
            .query("UPDATE $id SET read = true RETURN AFTER")
            .bind(("id", rid))
            .await?
            .take(0)?;

        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Notification {} not found", id)))
    }

    /// Hard delete a notification
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let notification: Option<Notification> =
            self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(notification.is_some())
    }
}
