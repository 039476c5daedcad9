//! Order API Handlers

use std::collections::{HashMap, HashSet};

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Order, OrderListEntry, OrderStatus, PlaceOrder, UpdateStatusRequest};
use crate::orders::OrderError;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub seller_id: Option<String>,
}

/// POST /api/orders - 下单
pub async fn place(
    State(state): State<ServerState>,
    Json(payload): Json<PlaceOrder>,
) -> AppResult<Json<Order>> {
    match state.order_intake().place_order(payload).await {
        Ok(order) => Ok(Json(order)),
        Err(OrderError::Validation(msg)) => Err(AppError::validation(msg)),
        Err(e) => {
            // 具体原因只进日志，对外统一为下单失败
            tracing::error!(error = %e, "Order placement failed");
            Err(AppError::internal("Failed to place order"))
        }
    }
}

/// GET /api/orders?sellerId= - 订单列表 (可按卖家过滤)，附带卖家名称
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderListEntry>>> {
    let repo = state.orders();
    let orders = match &query.seller_id {
        Some(seller_id) => repo.find_by_seller(seller_id).await?,
        None => repo.find_all().await?,
    };

    Ok(Json(with_seller_names(&state, orders).await?))
}

/// GET /api/orders/user/:user_id - 买家订单列表
pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders().find_by_user(&user_id).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// PUT /api/orders/status - 更新订单状态
///
/// 状态枚举之外的值按验证错误处理 (400 + 错误码)。
pub async fn update_status(
    State(state): State<ServerState>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let status: OrderStatus = payload
        .status
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid order status: {}", payload.status)))?;

    let order = state.orders().update_status(&payload.order_id, status).await?;
    Ok(Json(order))
}

/// DELETE /api/orders/:id - 删除订单
pub async fn delete_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = state.orders().delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Order {} not found", id)));
    }
    Ok(Json(true))
}

/// 为订单列表补充卖家显示名称 (每个卖家只查一次)
async fn with_seller_names(
    state: &ServerState,
    orders: Vec<Order>,
) -> Result<Vec<OrderListEntry>, AppError> {
    let sellers = state.sellers();

    let mut names: HashMap<String, String> = HashMap::new();
    let mut missing: HashSet<String> = HashSet::new();
    for order in &orders {
        for item in &order.items {
            missing.insert(item.seller_id.clone());
        }
    }
    for seller_id in missing {
        if let Some(seller) = sellers.find_by_id(&seller_id).await? {
            names.insert(seller_id, seller.name);
        }
    }

    let entries = orders
        .into_iter()
        .map(|order| {
            let mut seen = HashSet::new();
            let seller_names = order
                .items
                .iter()
                .filter(|item| seen.insert(item.seller_id.clone()))
                .filter_map(|item| names.get(&item.seller_id).cloned())
                .collect();
            OrderListEntry {
                order,
                seller_names,
            }
        })
        .collect();

    Ok(entries)
}
