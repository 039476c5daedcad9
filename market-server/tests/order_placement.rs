//! 下单流水线集成测试
//!
//! 使用内存引擎跑完整流程：校验 -> 库存扣减 -> 落库 -> 卖家散发。

use market_server::db::models::{CartItem, PlaceOrder, ProductCreate};
use market_server::orders::OrderError;
use market_server::{Config, ServerState};
use shared::NotificationKind;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn test_state() -> ServerState {
    let db = Surreal::new::<Mem>(()).await.expect("mem db");
    db.use_ns("market").use_db("market").await.expect("ns/db");

    let work_dir = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(work_dir.path().to_string_lossy(), 0, 0);
    ServerState::with_db(config, db)
}

async fn seed_seller(state: &ServerState, name: &str) -> String {
    let seller = state
        .sellers()
        .create(market_server::db::models::SellerCreate {
            name: name.to_string(),
            user_name: name.to_lowercase(),
            email: format!("{}@example.com", name.to_lowercase()),
        })
        .await
        .expect("create seller");
    seller.id.expect("seller id").to_string()
}

async fn seed_product(
    state: &ServerState,
    seller_id: &str,
    title: &str,
    price: f64,
    quantity: i32,
) -> String {
    let product = state
        .products()
        .create(ProductCreate {
            title: title.to_string(),
            price,
            description: None,
            category: None,
            image: None,
            quantity,
            seller_id: seller_id.to_string(),
            badge: None,
        })
        .await
        .expect("create product");
    product.id.expect("product id").to_string()
}

fn cart_item(product_id: &str, seller_id: &str, title: &str, price: f64, quantity: i32) -> CartItem {
    CartItem {
        product_id: product_id.to_string(),
        seller_id: seller_id.to_string(),
        title: title.to_string(),
        price,
        quantity,
        image: String::new(),
        category: String::new(),
    }
}

fn place_request(user_id: &str, items: Vec<CartItem>, total: f64) -> PlaceOrder {
    PlaceOrder {
        user_id: user_id.to_string(),
        cart_items: items,
        total_price: total,
        shipping_address: Some("1 Main St".to_string()),
        payment_id: Some("pay_123".to_string()),
        discount: None,
    }
}

#[tokio::test]
async fn place_order_happy_path() {
    let state = test_state().await;
    let seller = seed_seller(&state, "Alice").await;
    let product = seed_product(&state, &seller, "Lamp", 10.0, 10).await;

    let request = place_request(
        "user:bob",
        vec![cart_item(&product, &seller, "Lamp", 10.0, 2)],
        20.0,
    );

    let order = state
        .order_intake()
        .place_order(request)
        .await
        .expect("order placed");

    // 订单落库，状态 Processing
    let order_id = order.id.clone().expect("order id").to_string();
    let stored = state
        .orders()
        .find_by_id(&order_id)
        .await
        .expect("query")
        .expect("stored order");
    assert_eq!(
        stored.status,
        market_server::db::models::OrderStatus::Processing
    );
    assert_eq!(stored.total_price, 20.0);
    assert!(!stored.delivery_date.is_empty());

    // 库存 10 -> 8
    let p = state
        .products()
        .find_by_id(&product)
        .await
        .expect("query")
        .expect("product");
    assert_eq!(p.quantity, 8);

    // 卖家订单历史登记了一次
    let s = state
        .sellers()
        .find_by_id(&seller)
        .await
        .expect("query")
        .expect("seller");
    assert_eq!(s.orders, vec![order_id]);

    // 新订单通知落库
    let notifications = state
        .notifications()
        .find_by_receiver(&seller)
        .await
        .expect("notifications");
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::NewOrder);
    assert_eq!(notifications[0].message, "New order placed for 'Lamp'");
    assert!(!notifications[0].read);
}

#[tokio::test]
async fn insufficient_stock_releases_earlier_reservations() {
    let state = test_state().await;
    let seller = seed_seller(&state, "Alice").await;
    let plenty = seed_product(&state, &seller, "Lamp", 10.0, 10).await;
    let scarce = seed_product(&state, &seller, "Rug", 5.0, 3).await;

    let request = place_request(
        "user:bob",
        vec![
            cart_item(&plenty, &seller, "Lamp", 10.0, 2),
            cart_item(&scarce, &seller, "Rug", 5.0, 5),
        ],
        45.0,
    );

    let err = state
        .order_intake()
        .place_order(request)
        .await
        .expect_err("should fail");
    assert!(matches!(err, OrderError::InsufficientStock(_)));

    // 第一行已扣减的库存回滚，第二行原样
    let p1 = state.products().find_by_id(&plenty).await.unwrap().unwrap();
    let p2 = state.products().find_by_id(&scarce).await.unwrap().unwrap();
    assert_eq!(p1.quantity, 10);
    assert_eq!(p2.quantity, 3);

    // 没有订单，没有通知
    assert!(state.orders().find_all().await.unwrap().is_empty());
    assert!(
        state
            .notifications()
            .find_by_receiver(&seller)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn unknown_product_fails_placement() {
    let state = test_state().await;
    let seller = seed_seller(&state, "Alice").await;

    let request = place_request(
        "user:bob",
        vec![cart_item("product:missing", &seller, "Ghost", 10.0, 1)],
        10.0,
    );

    let err = state
        .order_intake()
        .place_order(request)
        .await
        .expect_err("should fail");
    assert!(matches!(err, OrderError::ProductNotFound(_)));
    assert!(state.orders().find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let state = test_state().await;
    let seller = seed_seller(&state, "Alice").await;
    let product = seed_product(&state, &seller, "Lamp", 10.0, 10).await;
    let item = cart_item(&product, &seller, "Lamp", 10.0, 1);

    // 买家为空
    let err = state
        .order_intake()
        .place_order(place_request("", vec![item.clone()], 10.0))
        .await
        .expect_err("empty user");
    match err {
        OrderError::Validation(msg) => assert_eq!(msg, "Missing required fields for order"),
        other => panic!("expected validation error, got {:?}", other),
    }

    // 购物车为空
    let err = state
        .order_intake()
        .place_order(place_request("user:bob", vec![], 10.0))
        .await
        .expect_err("empty cart");
    assert!(matches!(err, OrderError::Validation(_)));

    // 总价非正
    let err = state
        .order_intake()
        .place_order(place_request("user:bob", vec![item.clone()], 0.0))
        .await
        .expect_err("zero total");
    assert!(matches!(err, OrderError::Validation(_)));

    // 库存没有被碰过
    let p = state.products().find_by_id(&product).await.unwrap().unwrap();
    assert_eq!(p.quantity, 10);
}

#[tokio::test]
async fn total_price_mismatch_is_rejected() {
    let state = test_state().await;
    let seller = seed_seller(&state, "Alice").await;
    let product = seed_product(&state, &seller, "Lamp", 10.0, 10).await;

    // 2 × 10.0 = 20.0，提交 25.0
    let request = place_request(
        "user:bob",
        vec![cart_item(&product, &seller, "Lamp", 10.0, 2)],
        25.0,
    );

    let err = state
        .order_intake()
        .place_order(request)
        .await
        .expect_err("mismatched total");
    assert!(matches!(err, OrderError::Validation(_)));

    // 折扣参与校验: 2 × 10.0 − 3.0 = 17.0
    let mut request = place_request(
        "user:bob",
        vec![cart_item(&product, &seller, "Lamp", 10.0, 2)],
        17.0,
    );
    request.discount = Some(3.0);
    let order = state
        .order_intake()
        .place_order(request)
        .await
        .expect("discounted order");
    assert_eq!(order.discount, 3.0);
}

#[tokio::test]
async fn fanout_notifies_each_seller_once() {
    let state = test_state().await;
    let s1 = seed_seller(&state, "Alice").await;
    let s2 = seed_seller(&state, "Bob").await;
    let s3 = seed_seller(&state, "Carol").await;
    let p1 = seed_product(&state, &s1, "Lamp", 10.0, 10).await;
    let p2 = seed_product(&state, &s2, "Rug", 5.0, 10).await;
    let p3 = seed_product(&state, &s2, "Vase", 8.0, 10).await;
    let p4 = seed_product(&state, &s3, "Desk", 50.0, 10).await;

    // S1, S2, S2, S3 — S2 出现两次
    let request = place_request(
        "user:bob",
        vec![
            cart_item(&p1, &s1, "Lamp", 10.0, 1),
            cart_item(&p2, &s2, "Rug", 5.0, 1),
            cart_item(&p3, &s2, "Vase", 8.0, 1),
            cart_item(&p4, &s3, "Desk", 50.0, 1),
        ],
        73.0,
    );

    let order = state
        .order_intake()
        .place_order(request)
        .await
        .expect("order placed");
    let order_id = order.id.expect("order id").to_string();

    for seller in [&s1, &s2, &s3] {
        let s = state.sellers().find_by_id(seller).await.unwrap().unwrap();
        assert_eq!(s.orders, vec![order_id.clone()], "one ref per seller");

        let notifications = state
            .notifications()
            .find_by_receiver(seller)
            .await
            .unwrap();
        let new_order: Vec<_> = notifications
            .iter()
            .filter(|n| n.kind == NotificationKind::NewOrder)
            .collect();
        assert_eq!(new_order.len(), 1, "one new_order notification per seller");
    }

    // 去重取第一个出现的商品标题
    let n2 = state.notifications().find_by_receiver(&s2).await.unwrap();
    assert_eq!(n2[0].message, "New order placed for 'Rug'");
}

#[tokio::test]
async fn low_stock_alert_fires_at_threshold() {
    let state = test_state().await;
    let seller = seed_seller(&state, "Alice").await;

    // 6 -> 5 触发一次
    let near = seed_product(&state, &seller, "Lamp", 10.0, 6).await;
    let request = place_request(
        "user:bob",
        vec![cart_item(&near, &seller, "Lamp", 10.0, 1)],
        10.0,
    );
    state.order_intake().place_order(request).await.unwrap();

    let low_stock: Vec<_> = state
        .notifications()
        .find_by_receiver(&seller)
        .await
        .unwrap()
        .into_iter()
        .filter(|n| n.kind == NotificationKind::LowStock)
        .collect();
    assert_eq!(low_stock.len(), 1);
    assert!(low_stock[0].message.contains("Lamp"));

    // 10 -> 9 不触发
    let plenty = seed_product(&state, &seller, "Desk", 50.0, 10).await;
    let request = place_request(
        "user:bob",
        vec![cart_item(&plenty, &seller, "Desk", 50.0, 1)],
        50.0,
    );
    state.order_intake().place_order(request).await.unwrap();

    let low_stock_after: Vec<_> = state
        .notifications()
        .find_by_receiver(&seller)
        .await
        .unwrap()
        .into_iter()
        .filter(|n| n.kind == NotificationKind::LowStock)
        .collect();
    assert_eq!(low_stock_after.len(), 1, "no new low_stock alert");
}

#[tokio::test]
async fn low_stock_alert_targets_product_owner() {
    let state = test_state().await;
    let owner = seed_seller(&state, "Alice").await;
    let other = seed_seller(&state, "Mallory").await;
    let product = seed_product(&state, &owner, "Lamp", 10.0, 6).await;

    // 购物车行谎报卖家：警报仍要发给库中登记的主人
    let request = place_request(
        "user:bob",
        vec![cart_item(&product, &other, "Lamp", 10.0, 1)],
        10.0,
    );
    state.order_intake().place_order(request).await.unwrap();

    let owner_low_stock: Vec<_> = state
        .notifications()
        .find_by_receiver(&owner)
        .await
        .unwrap()
        .into_iter()
        .filter(|n| n.kind == NotificationKind::LowStock)
        .collect();
    assert_eq!(owner_low_stock.len(), 1, "owner gets the alert");
    assert!(owner_low_stock[0].message.contains("Lamp"));

    let other_low_stock: Vec<_> = state
        .notifications()
        .find_by_receiver(&other)
        .await
        .unwrap()
        .into_iter()
        .filter(|n| n.kind == NotificationKind::LowStock)
        .collect();
    assert!(other_low_stock.is_empty(), "cart-line seller gets no alert");
}

#[tokio::test]
async fn concurrent_placement_never_oversells() {
    let state = test_state().await;
    let seller = seed_seller(&state, "Alice").await;
    let product = seed_product(&state, &seller, "Lamp", 10.0, 1).await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let state = state.clone();
        let product = product.clone();
        let seller = seller.clone();
        handles.push(tokio::spawn(async move {
            let request = PlaceOrder {
                user_id: format!("user:{}", i),
                cart_items: vec![CartItem {
                    product_id: product,
                    seller_id: seller,
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
            };
            state.order_intake().place_order(request).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.expect("task").is_ok() {
            successes += 1;
        }
    }

    // 库存 1：最多一个成功，库存永不为负
    assert!(successes <= 1, "got {} successes for stock 1", successes);
    let p = state.products().find_by_id(&product).await.unwrap().unwrap();
    assert!(p.quantity >= 0);
    assert_eq!(p.quantity, 1 - successes);

    // 顺序路径上的确定性检查：库存耗尽后必然失败
    if successes == 1 {
        let request = place_request(
            "user:late",
            vec![cart_item(&product, &seller, "Lamp", 10.0, 1)],
            10.0,
        );
        let err = state
            .order_intake()
            .place_order(request)
            .await
            .expect_err("stock exhausted");
        assert!(matches!(err, OrderError::InsufficientStock(_)));
    }
}

#[tokio::test]
async fn status_update_and_user_listing() {
    let state = test_state().await;
    let seller = seed_seller(&state, "Alice").await;
    let product = seed_product(&state, &seller, "Lamp", 10.0, 10).await;

    let request = place_request(
        "user:bob",
        vec![cart_item(&product, &seller, "Lamp", 10.0, 1)],
        10.0,
    );
    let order = state.order_intake().place_order(request).await.unwrap();
    let order_id = order.id.expect("order id").to_string();

    let updated = state
        .orders()
        .update_status(&order_id, market_server::db::models::OrderStatus::Shipped)
        .await
        .unwrap();
    assert_eq!(updated.status, market_server::db::models::OrderStatus::Shipped);

    let mine = state.orders().find_by_user("user:bob").await.unwrap();
    assert_eq!(mine.len(), 1);
    assert!(state.orders().find_by_user("user:else").await.unwrap().is_empty());

    let by_seller = state.orders().find_by_seller(&seller).await.unwrap();
    assert_eq!(by_seller.len(), 1);
}
