//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub seller_id: Option<String>,
}

/// POST /api/products - 创建商品，并登记到卖家目录
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let seller_id = payload.seller_id.clone();

    state
        .sellers()
        .find_by_id(&seller_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Seller {} not found", seller_id)))?;

    let product = state.products().create(payload).await?;

    let product_id = product
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();
    state.sellers().push_product(&seller_id, &product_id).await?;

    Ok(Json(product))
}

/// GET /api/products?sellerId= - 商品列表 (可按卖家过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = state.products();
    let products = match &query.seller_id {
        Some(seller_id) => repo.find_by_seller(seller_id).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(products))
}

/// GET /api/products/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state
        .products()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product))
}

/// PUT /api/products/:id - 更新商品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let product = state.products().update(&id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id - 删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = state.products().delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Product {} not found", id)));
    }
    Ok(Json(true))
}
