//! Seller Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Seller account review state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SellerStatus {
    Pending,
    Approved,
    Rejected,
}

impl Default for SellerStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Seller model
///
/// `products` 和 `orders` 保存关联记录 ID 字符串 ("product:x" / "order:y")。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub user_name: String,
    pub email: String,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub orders: Vec<String>,
    #[serde(default)]
    pub status: SellerStatus,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerCreate {
    pub name: String,
    pub user_name: String,
    pub email: String,
}

/// Status review payload (admin)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSellerStatus {
    pub status: SellerStatus,
}
