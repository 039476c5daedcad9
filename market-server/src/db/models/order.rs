//! Order Model
//!
//! 订单行项目是下单时刻的快照 (标题/单价/图片等)，商品后续变更不影响历史订单。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

// =============================================================================
// Order (主表)
// =============================================================================

/// Order lifecycle status
///
/// No transition constraints are enforced: any status may follow any other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::str::FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(()),
        }
    }
}

/// One line of an order — denormalized snapshot at purchase time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub seller_id: String,
    pub title: String,
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

/// Persisted order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    #[serde(default)]
    pub discount: f64,
    pub payment_id: Option<String>,
    pub shipping_address: Option<String>,
    pub status: OrderStatus,
    /// Estimated delivery date (RFC 3339)
    pub delivery_date: String,
    pub created_at: Option<String>,
}

// =============================================================================
// API Request Types
// =============================================================================

/// One cart line as submitted by the storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub seller_id: String,
    pub title: String,
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

impl CartItem {
    /// Freeze the cart line into an order line snapshot
    pub fn into_order_item(self) -> OrderItem {
        OrderItem {
            product_id: self.product_id,
            seller_id: self.seller_id,
            title: self.title,
            price: self.price,
            quantity: self.quantity,
            image: self.image,
            category: self.category,
        }
    }
}

/// Place order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
    #[serde(default)]
    pub total_price: f64,
    pub shipping_address: Option<String>,
    pub payment_id: Option<String>,
    pub discount: Option<f64>,
}

/// Status update payload
///
/// `status` stays a raw string here so the handler can turn an unknown
/// value into a validation error instead of a body-rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub order_id: String,
    pub status: String,
}

// =============================================================================
// API Response Types (for frontend)
// =============================================================================

/// Order list entry with seller names assembled for display
#[derive(Debug, Clone, Serialize)]
pub struct OrderListEntry {
    #[serde(flatten)]
    pub order: Order,
    pub seller_names: Vec<String>,
}
