//! Order Repository

use super::{record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderStatus};
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all orders, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find orders containing at least one line from the given seller
    pub async fn find_by_seller(&self, seller_id: &str) -> RepoResult<Vec<Order>> {
        let seller_id = seller_id.to_string();
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE items.seller_id CONTAINS $seller \
                 ORDER BY created_at DESC",
            )
            .bind(("seller", seller_id))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find all orders placed by a user
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let user_id = user_id.to_string();
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE user_id = $user ORDER BY created_at DESC")
            .bind(("user", user_id))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(order)
    }

    /// Persist a new order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Update the lifecycle status of an order
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let rid = record_id(TABLE, id);
        let updated: Vec<Order> = self
            .base
            .db()
            .query("UPDATE $id SET status = $status RETURN AFTER")
            .bind(("id", rid))
            .bind(("status", status))
            .await?
            .take(0)?;

        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Hard delete an order
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let order: Option<Order> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(order.is_some())
    }
}
