//! Priced view of a cart.

use crate::cart::Cart;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One priced cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub product_id: ProductId,
    pub title: String,
    pub unit_price: Money,
    pub amount: i64,
    /// `unit_price × amount`.
    pub subtotal: Money,
}

/// Per-line subtotals and the cart total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    pub lines: Vec<SummaryLine>,
    pub item_count: i64,
    pub total: Money,
}

impl Cart {
    /// Price every line in `currency`.
    ///
    /// Returns an error only if a subtotal or the total overflows.
    pub fn summary(&self, currency: Currency) -> Result<CartSummary, CartError> {
        let lines = self
            .items()
            .iter()
            .map(|product| {
                let unit_price = Money::from_decimal(product.price, currency);
                let subtotal = unit_price
                    .try_multiply(product.amount)
                    .ok_or(CartError::Overflow)?;
                Ok(SummaryLine {
                    product_id: product.id,
                    title: product.title.clone(),
                    unit_price,
                    amount: product.amount,
                    subtotal,
                })
            })
            .collect::<Result<Vec<_>, CartError>>()?;

        let total = Money::try_sum(lines.iter().map(|l| &l.subtotal), currency)
            .ok_or(CartError::Overflow)?;

        Ok(CartSummary {
            lines,
            item_count: self.item_count(),
            total,
        })
    }
}
