//! Notification API Handlers
//!
//! 离线接收方的拉取路径：实时推送丢失的通知在这里补齐。

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::Notification;
use crate::utils::{AppError, AppResult};

/// GET /api/notifications/:seller_id - 卖家的全部通知
pub async fn list(
    State(state): State<ServerState>,
    Path(seller_id): Path<String>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = state.notifications().find_by_receiver(&seller_id).await?;
    Ok(Json(notifications))
}

/// GET /api/notifications/:seller_id/unread - 卖家的未读通知
pub async fn list_unread(
    State(state): State<ServerState>,
    Path(seller_id): Path<String>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = state.notifications().find_unread(&seller_id).await?;
    Ok(Json(notifications))
}

/// PUT /api/notifications/:id/read - 标记已读
pub async fn mark_read(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Notification>> {
    let notification = state.notifications().mark_read(&id).await?;
    Ok(Json(notification))
}

/// DELETE /api/notifications/:id - 删除通知
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = state.notifications().delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!(
            "Notification {} not found",
            id
        )));
    }
    Ok(Json(true))
}
