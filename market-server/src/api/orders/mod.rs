//! Order API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::place).get(handler::list))
        .route("/status", put(handler::update_status))
        .route("/user/{user_id}", get(handler::list_by_user))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete_order))
}
