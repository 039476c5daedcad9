//! Product Repository
//!
//! 库存扣减必须走 `reserve`：带条件的单语句更新，数据库层保证不超卖。

use super::{record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find all products belonging to a seller
    pub async fn find_by_seller(&self, seller_id: &str) -> RepoResult<Vec<Product>> {
        let seller_id = seller_id.to_string();
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE seller_id = $seller ORDER BY created_at DESC")
            .bind(("seller", seller_id))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(product)
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.quantity < 0 {
            return Err(RepoError::Validation(
                "Product quantity cannot be negative".to_string(),
            ));
        }

        let product = Product {
            id: None,
            title: data.title,
            price: data.price,
            description: data.description.unwrap_or_default(),
            category: data.category.unwrap_or_default(),
            image: data.image.unwrap_or_default(),
            quantity: data.quantity,
            seller_id: data.seller_id,
            badge: data.badge.unwrap_or_default(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };

        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let rid = record_id(TABLE, id);
        if let Some(qty) = data.quantity
            && qty < 0
        {
            return Err(RepoError::Validation(
                "Product quantity cannot be negative".to_string(),
            ));
        }

        let updated: Vec<Product> = self
            .base
            .db()
            .query("UPDATE $id MERGE $data RETURN AFTER")
            .bind(("id", rid))
            .bind(("data", data))
            .await?
            .take(0)?;

        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let product: Option<Product> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(product.is_some())
    }

    /// Atomically reserve stock: decrement only when enough remains.
    ///
    /// Returns the product state after the decrement. A product whose stock
    /// is below `qty` is left untouched and reported as InsufficientStock.
    pub async fn reserve(&self, id: &str, qty: i32) -> RepoResult<Product> {
        if qty <= 0 {
            return Err(RepoError::Validation(format!(
                "Reserve quantity must be positive, got {}",
                qty
            )));
        }

        let rid = record_id(TABLE, id);
        let updated: Vec<Product> = self
            .base
            .db()
            .query("UPDATE $id SET quantity -= $qty WHERE quantity >= $qty RETURN AFTER")
            .bind(("id", rid))
            .bind(("qty", qty))
            .await?
            .take(0)?;

        if let Some(product) = updated.into_iter().next() {
            return Ok(product);
        }

        // Nothing updated: distinguish missing product from short stock
        match self.find_by_id(id).await? {
            Some(product) => Err(RepoError::InsufficientStock(format!(
                "Product '{}' has {} in stock, requested {}",
                product.title, product.quantity, qty
            ))),
            None => Err(RepoError::NotFound(format!("Product {} not found", id))),
        }
    }

    /// Return previously reserved stock (compensation path)
    pub async fn release(&self, id: &str, qty: i32) -> RepoResult<Product> {
        let rid = record_id(TABLE, id);
        let updated: Vec<Product> = self
            .base
            .db()
            .query("UPDATE $id SET quantity += $qty RETURN AFTER")
            .bind(("id", rid))
            .bind(("qty", qty))
            .await?
            .take(0)?;

        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }
}
