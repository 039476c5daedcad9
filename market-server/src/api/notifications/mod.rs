//! Notification API 模块

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/notifications", routes())
}

fn routes() -> Router<ServerState> {
    // GET/DELETE 的路径参数分别是 seller id 和 notification id，
    // 但必须共用同一个占位符名称，否则路由冲突
    Router::new()
        .route("/{id}", get(handler::list).delete(handler::delete))
        .route("/{id}/unread", get(handler::list_unread))
        .route("/{id}/read", put(handler::mark_read))
}
