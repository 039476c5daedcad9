//! Seller Fan-out
//!
//! 订单落库后按卖家维度散发：记账 (卖家订单历史) 和通知 (新订单 / 低库存)。
//! 整个阶段尽力而为：任何一步失败只记日志，订单本身已经成立。

use std::collections::HashSet;

use shared::NotificationKind;

use super::inventory::Reservation;
use super::LOW_STOCK_THRESHOLD;
use crate::db::models::Order;
use crate::db::repository::SellerRepository;
use crate::notify::Notifier;

/// Post-placement per-seller dispatch
#[derive(Clone)]
pub struct SellerFanout {
    sellers: SellerRepository,
    notifier: Notifier,
}

impl SellerFanout {
    pub fn new(sellers: SellerRepository, notifier: Notifier) -> Self {
        Self { sellers, notifier }
    }

    /// Dispatch a persisted order to every distinct seller it touches,
    /// then emit low-stock alerts for lines that drained stock to the
    /// threshold or below.
    pub async fn dispatch(&self, order: &Order, reservations: &[Reservation]) {
        let order_id = order
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default();

        // 每个卖家只处理一次，顺序按购物车中首次出现
        let mut seen: HashSet<&str> = HashSet::new();
        for item in &order.items {
            if !seen.insert(item.seller_id.as_str()) {
                continue;
            }

            if let Err(e) = self.sellers.push_order(&item.seller_id, &order_id).await {
                tracing::warn!(
                    seller_id = %item.seller_id,
                    order_id = %order_id,
                    "Failed to record order on seller: {}",
                    e
                );
            }

            let message = format!("New order placed for '{}'", item.title);
            if let Err(e) = self
                .notifier
                .notify(&item.seller_id, &message, NotificationKind::NewOrder)
                .await
            {
                tracing::warn!(
                    seller_id = %item.seller_id,
                    order_id = %order_id,
                    "Failed to emit new-order notification: {}",
                    e
                );
            }
        }

        for r in reservations {
            if r.remaining > LOW_STOCK_THRESHOLD {
                continue;
            }

            let message = format!(
                "Product '{}' is running low on stock ({} left)",
                r.title, r.remaining
            );
            if let Err(e) = self
                .notifier
                .notify(&r.seller_id, &message, NotificationKind::LowStock)
                .await
            {
                tracing::warn!(
                    seller_id = %r.seller_id,
                    product_id = %r.product_id,
                    "Failed to emit low-stock notification: {}",
                    e
                );
            }
        }
    }
}
