//! Shopping cart module.
//!
//! Contains the cart list and its priced summary.

mod cart;
mod summary;

pub use cart::Cart;
pub use summary::{CartSummary, SummaryLine};
