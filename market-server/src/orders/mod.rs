//! Order Placement Domain
//!
//! 流水线分三段：intake (校验 + 编排)、inventory (条件扣减 + 回滚)、
//! fanout (卖家记账 + 通知散发)。

pub mod error;
pub mod fanout;
pub mod intake;
pub mod inventory;

pub use error::{OrderError, OrderResult};
pub use fanout::SellerFanout;
pub use intake::OrderIntake;
pub use inventory::{InventoryAdjuster, Reservation};

/// Stock level at or below which a low-stock alert is sent to the seller
pub const LOW_STOCK_THRESHOLD: i32 = 5;

/// Days added to the placement time for the delivery estimate
pub const DELIVERY_ESTIMATE_DAYS: i64 = 5;

/// Tolerance when checking the submitted total against the line items
pub const PRICE_EPSILON: f64 = 0.01;
