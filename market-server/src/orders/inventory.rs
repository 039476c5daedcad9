//! Inventory Adjuster
//!
//! 按订单行逐个条件扣减库存。任一行扣减失败时，回滚已扣减的行，
//! 保证失败的下单不留下库存侧影。

use super::error::{OrderError, OrderResult};
use crate::db::models::OrderItem;
use crate::db::repository::{ProductRepository, RepoError};

/// Record of a successful stock decrement, kept for compensation and
/// low-stock detection.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub product_id: String,
    pub seller_id: String,
    pub title: String,
    pub quantity: i32,
    /// Stock remaining after the decrement
    pub remaining: i32,
}

/// Applies and reverts stock decrements for order placement
#[derive(Clone)]
pub struct InventoryAdjuster {
    products: ProductRepository,
}

impl InventoryAdjuster {
    pub fn new(products: ProductRepository) -> Self {
        Self { products }
    }

    /// Reserve stock for every order line, in cart order.
    ///
    /// The decrement itself is a single conditional update, so concurrent
    /// orders cannot drive stock negative. On the first failing line all
    /// earlier reservations are released and the error is returned.
    pub async fn reserve_all(&self, items: &[OrderItem]) -> OrderResult<Vec<Reservation>> {
        let mut reserved: Vec<Reservation> = Vec::with_capacity(items.len());

        for item in items {
            match self.products.reserve(&item.product_id, item.quantity).await {
                Ok(product) => {
                    // 低库存警报的收件人是商品在库中登记的主人，
                    // 不采信购物车行里携带的卖家字段
                    reserved.push(Reservation {
                        product_id: item.product_id.clone(),
                        seller_id: product.seller_id,
                        title: product.title,
                        quantity: item.quantity,
                        remaining: product.quantity,
                    });
                }
                Err(e) => {
                    self.release_all(&reserved).await;
                    return Err(match e {
                        RepoError::NotFound(msg) => OrderError::ProductNotFound(msg),
                        RepoError::InsufficientStock(msg) => OrderError::InsufficientStock(msg),
                        RepoError::Validation(msg) => OrderError::Validation(msg),
                        RepoError::Database(msg) => OrderError::Database(msg),
                    });
                }
            }
        }

        Ok(reserved)
    }

    /// Return previously reserved stock (compensation path).
    ///
    /// Failures are logged, not propagated: the caller is already unwinding.
    pub async fn release_all(&self, reservations: &[Reservation]) {
        for r in reservations {
            if let Err(e) = self.products.release(&r.product_id, r.quantity).await {
                tracing::warn!(
                    product_id = %r.product_id,
                    quantity = r.quantity,
                    "Failed to release reserved stock: {}",
                    e
                );
            }
        }
    }
}
