//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`orders`] - 订单接口 (下单 / 查询 / 状态更新)
//! - [`products`] - 商品管理接口
//! - [`sellers`] - 卖家管理接口
//! - [`notifications`] - 通知查询接口

pub mod health;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod sellers;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full application router
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(products::router())
        .merge(sellers::router())
        .merge(notifications::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
