//! Seller Repository

use super::{record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Seller, SellerCreate, SellerStatus};
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

const TABLE: &str = "seller";

#[derive(Clone)]
pub struct SellerRepository {
    base: BaseRepository,
}

impl SellerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all sellers, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Seller>> {
        let sellers: Vec<Seller> = self
            .base
            .db()
            .query("SELECT * FROM seller ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(sellers)
    }

    /// Find seller by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Seller>> {
        let seller: Option<Seller> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(seller)
    }

    /// Create a new seller (starts in pending review)
    pub async fn create(&self, data: SellerCreate) -> RepoResult<Seller> {
        let seller = Seller {
            id: None,
            name: data.name,
            user_name: data.user_name,
            email: data.email,
            products: Vec::new(),
            orders: Vec::new(),
            status: SellerStatus::Pending,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };

        let created: Option<Seller> = self.base.db().create(TABLE).content(seller).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create seller".to_string()))
    }

    /// Update the review status of a seller
    pub async fn update_status(&self, id: &str, status: SellerStatus) -> RepoResult<Seller> {
        let rid = record_id(TABLE, id);
        let updated: Vec<Seller> = self
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
            .ok_or_else(|| RepoError::NotFound(format!("Seller {} not found", id)))
    }

    /// Append an order reference to the seller's order history
    pub async fn push_order(&self, id: &str, order_id: &str) -> RepoResult<Seller> {
        let rid = record_id(TABLE, id);
        let order_id = order_id.to_string();
        let updated: Vec<Seller> = self
            .base
            .db()
            .query("UPDATE $id SET orders += $order RETURN AFTER")
            .bind(("id", rid))
            .bind(("order", order_id))
            .await?
            .take(0)?;

        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Seller {} not found", id)))
    }

    /// Append a product reference to the seller's catalog
    pub async fn push_product(&self, id: &str, product_id: &str) -> RepoResult<Seller> {
        let rid = record_id(TABLE, id);
        let product_id = product_id.to_string();
        let updated: Vec<Seller> = self
            .base
            .db()
            .query("UPDATE $id SET products += $product RETURN AFTER")
            .bind(("id", rid))
            .bind(("product", product_id))
            .await?
            .take(0)?;

        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Seller {} not found", id)))
    }
}
