//! 订单 HTTP 接口测试
//!
//! 直接向组装好的路由发请求，验证状态码与响应包格式。

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use market_server::db::models::{CartItem, PlaceOrder, ProductCreate, SellerCreate};
use market_server::{Config, ServerState};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tower::ServiceExt;

async fn test_state() -> ServerState {
    let db = Surreal::new::<Mem>(()).await.expect("mem db");
    db.use_ns("market").use_db("market").await.expect("ns/db");

    let work_dir = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(work_dir.path().to_string_lossy(), 0, 0);
    ServerState::with_db(config, db)
}

async fn seed_order(state: &ServerState) -> String {
    let seller = state
        .sellers()
        .create(SellerCreate {
            name: "Alice".to_string(),
            user_name: "alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await
        .expect("create seller");
    let seller_id = seller.id.expect("seller id").to_string();

    let product = state
        .products()
        .create(ProductCreate {
            title: "Lamp".to_string(),
            price: 10.0,
            description: None,
            category: None,
            image: None,
            quantity: 10,
            seller_id: seller_id.clone(),
            badge: None,
        })
        .await
        .expect("create product");
    let product_id = product.id.expect("product id").to_string();

    let order = state
        .order_intake()
        .place_order(PlaceOrder {
            user_id: "user:bob".to_string(),
            cart_items: vec![CartItem {
                product_id,
                seller_id,
                title: "Lamp".to_string(),
                price: 10.0,
                quantity: 1,
                image: String::new(),
                category: String::new(),
            }],
            total_price: 10.0,
            shipping_address: None,
            payment_id: None,
            discount: None,
        })
        .await
        .expect("place order");
    order.id.expect("order id").to_string()
}

fn put_status(order_id: &str, status: &str) -> Request<Body> {
    let body = serde_json::json!({ "orderId": order_id, "status": status }).to_string();
    Request::builder()
        .method("PUT")
        .uri("/api/orders/status")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request")
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn unknown_status_is_rejected_with_coded_envelope() {
    let state = test_state().await;
    let app = market_server::api::create_router(state);

    let response = app
        .oneshot(put_status("order:nope", "Returned"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], "E0002");
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .contains("Invalid order status"),
    );
}

#[tokio::test]
async fn valid_status_update_round_trips() {
    let state = test_state().await;
    let order_id = seed_order(&state).await;
    let app = market_server::api::create_router(state);

    let response = app
        .oneshot(put_status(&order_id, "Shipped"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "Shipped");
}
