//! Order placement errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type OrderResult<T> = Result<T, OrderError>;
