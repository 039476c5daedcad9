//! Seller API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Seller, SellerCreate, UpdateSellerStatus};
use crate::utils::{AppError, AppResult};

/// POST /api/sellers - 登记卖家 (初始状态 pending)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SellerCreate>,
) -> AppResult<Json<Seller>> {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::validation("Seller name and email are required"));
    }
    let seller = state.sellers().create(payload).await?;
    Ok(Json(seller))
}

/// GET /api/sellers - 卖家列表
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Seller>>> {
    let sellers = state.sellers().find_all().await?;
    Ok(Json(sellers))
}

/// GET /api/sellers/:id - 获取单个卖家
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Seller>> {
    let seller = state
        .sellers()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Seller {} not found", id)))?;
    Ok(Json(seller))
}

/// PUT /api/sellers/:id/status - 审核卖家 (approved / rejected / pending)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSellerStatus>,
) -> AppResult<Json<Seller>> {
    let seller = state.sellers().update_status(&id, payload.status).await?;
    Ok(Json(seller))
}
