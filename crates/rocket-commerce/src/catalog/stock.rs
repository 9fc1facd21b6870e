//! Stock level type.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Units available for a product, as served by `GET /stock/{id}`.
///
/// Always fetched fresh; the cart never caches it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product the stock level belongs to.
    pub id: ProductId,
    /// Units available.
    pub amount: i64,
}

impl Stock {
    /// Create a stock level.
    pub fn new(id: ProductId, amount: i64) -> Self {
        Self { id, amount }
    }

    /// Whether the cart may hold `requested` units.
    ///
    /// The storefront keeps one unit back: the cart quantity must stay
    /// strictly below the reported stock.
    pub fn allows(&self, requested: i64) -> bool {
        requested < self.amount
    }
}
