//! Data Models
//!
//! Storage models use snake_case fields; API request payloads coming from the
//! storefront keep their original camelCase shape.

pub mod notification;
pub mod order;
pub mod product;
pub mod seller;
pub mod serde_helpers;

pub use notification::{Notification, NotificationCreate};
pub use order::{
    CartItem, Order, OrderItem, OrderListEntry, OrderStatus, PlaceOrder, UpdateStatusRequest,
};
pub use product::{Badge, Product, ProductCreate, ProductUpdate};
pub use seller::{Seller, SellerCreate, SellerStatus, UpdateSellerStatus};
