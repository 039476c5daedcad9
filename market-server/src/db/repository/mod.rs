//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

pub mod notification;
pub mod order;
pub mod product;
pub mod seller;

// Re-exports
pub use notification::NotificationRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use seller::SellerRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "product:abc".parse()?;
//   - 创建: let id = RecordId::from_table_key("product", "abc");
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId

/// Build a RecordId from a table name and an id that may or may not carry
/// the "table:" prefix.
pub(crate) fn record_id(table: &str, id: &str) -> RecordId {
    let key = id.strip_prefix(&format!("{table}:")).unwrap_or(id);
    RecordId::from_table_key(table, key)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
