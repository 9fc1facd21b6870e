//! Cart error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors that can occur while mutating the cart.
///
/// These never escape the store's public mutation methods; they are logged
/// and turned into a [`Notification`](crate::notify::Notification).
#[derive(Error, Debug)]
pub enum CartError {
    /// Requested quantity is not below the reported stock.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Catalog API call failed.
    #[error("Catalog request failed: {0}")]
    Fetch(#[from] rocket_data::FetchError),

    /// Persistence sink failed.
    #[error("Storage error: {0}")]
    Storage(#[from] rocket_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Arithmetic overflow in money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

impl CartError {
    /// Whether this is a stock rejection rather than a failure.
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, CartError::OutOfStock { .. })
    }
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::Serialization(e.to_string())
    }
}
