//! Health API Handlers

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::core::ServerState;

#[derive(Serialize)]
pub struct HealthStatus {
    status: &'static str,
    online_sellers: usize,
}

/// GET /api/health - 健康检查
pub async fn health(State(state): State<ServerState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        online_sellers: state.presence.online_count(),
    })
}
