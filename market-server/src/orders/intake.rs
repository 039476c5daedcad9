//! Order Intake
//!
//! 下单主流程：校验 -> 库存扣减 -> 订单落库 -> 卖家散发。
//! 散发阶段失败不影响已成立的订单。

use chrono::{Duration, Utc};

use super::error::{OrderError, OrderResult};
use super::fanout::SellerFanout;
use super::inventory::InventoryAdjuster;
use super::{DELIVERY_ESTIMATE_DAYS, PRICE_EPSILON};
use crate::db::models::{Order, OrderItem, OrderStatus, PlaceOrder};
use crate::db::repository::OrderRepository;

/// Order placement pipeline
#[derive(Clone)]
pub struct OrderIntake {
    orders: OrderRepository,
    inventory: InventoryAdjuster,
    fanout: SellerFanout,
}

impl OrderIntake {
    pub fn new(orders: OrderRepository, inventory: InventoryAdjuster, fanout: SellerFanout) -> Self {
        Self {
            orders,
            inventory,
            fanout,
        }
    }

    /// Place an order.
    ///
    /// Stock is reserved line by line before the order is persisted; if
    /// persistence fails the reservations are released. Fan-out (seller
    /// bookkeeping and notifications) runs after the order exists and is
    /// best-effort.
    pub async fn place_order(&self, request: PlaceOrder) -> OrderResult<Order> {
        validate(&request)?;

        let discount = request.discount.unwrap_or(0.0);
        let items: Vec<OrderItem> = request
            .cart_items
            .into_iter()
            .map(|item| item.into_order_item())
            .collect();

        let reservations = self.inventory.reserve_all(&items).await?;

        let now = Utc::now();
        let order = Order {
            id: None,
            user_id: request.user_id,
            items,
            total_price: request.total_price,
            discount,
            payment_id: request.payment_id,
            shipping_address: request.shipping_address,
            status: OrderStatus::Processing,
            delivery_date: (now + Duration::days(DELIVERY_ESTIMATE_DAYS)).to_rfc3339(),
            created_at: Some(now.to_rfc3339()),
        };

        let created = match self.orders.create(order).await {
            Ok(order) => order,
            Err(e) => {
                // 订单没落库，归还已扣减的库存
                self.inventory.release_all(&reservations).await;
                return Err(OrderError::Database(e.to_string()));
            }
        };

        self.fanout.dispatch(&created, &reservations).await;

        Ok(created)
    }
}

/// Request-shape validation. Stock checks happen later, in the adjuster.
fn validate(request: &PlaceOrder) -> OrderResult<()> {
    if request.user_id.trim().is_empty()
        || request.cart_items.is_empty()
        || request.total_price <= 0.0
    {
        return Err(OrderError::Validation(
            "Missing required fields for order".to_string(),
        ));
    }

    let mut expected = 0.0;
    for item in &request.cart_items {
        if item.product_id.trim().is_empty() || item.seller_id.trim().is_empty() {
            return Err(OrderError::Validation(
                "Cart item is missing a product or seller reference".to_string(),
            ));
        }
        if item.quantity <= 0 {
            return Err(OrderError::Validation(format!(
                "Invalid quantity {} for '{}'",
                item.quantity, item.title
            )));
        }
        if item.price < 0.0 {
            return Err(OrderError::Validation(format!(
                "Invalid price {} for '{}'",
                item.price, item.title
            )));
        }
        expected += item.price * item.quantity as f64;
    }

    expected -= request.discount.unwrap_or(0.0);
    if (expected - request.total_price).abs() > PRICE_EPSILON {
        return Err(OrderError::Validation(format!(
            "Total price mismatch: expected {:.2}, got {:.2}",
            expected, request.total_price
        )));
    }

    Ok(())
}
