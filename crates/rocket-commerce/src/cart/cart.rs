//! The cart list.

use std::collections::BTreeMap;

use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Ordered list of products held by the current session.
///
/// Order follows insertion and there is at most one entry per product id.
/// Serializes as a bare JSON array, which is the persisted format. Decoding
/// collapses repeated ids into one entry, the last one winning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Look up an entry by product id.
    pub fn get(&self, product_id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == product_id)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Quantity held for a product, zero if absent.
    pub fn amount_of(&self, product_id: ProductId) -> i64 {
        self.get(product_id).map_or(0, |p| p.amount)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all entries.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|p| p.amount).sum()
    }

    /// Quantity per product, for badges on product listings.
    pub fn amounts_by_product(&self) -> BTreeMap<ProductId, i64> {
        self.items.iter().map(|p| (p.id, p.amount)).collect()
    }

    /// Append a new entry, or replace the existing entry with the same id in
    /// place.
    pub fn upsert(&mut self, product: Product) {
        match self.items.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => self.items.push(product),
        }
    }

    /// Set the quantity of an existing entry. Returns `false` if absent.
    pub fn set_amount(&mut self, product_id: ProductId, amount: i64) -> bool {
        match self.items.iter_mut().find(|p| p.id == product_id) {
            Some(product) => {
                product.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Remove an entry. Returns `false` if absent.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|p| p.id != product_id);
        self.items.len() < len_before
    }
}

impl From<Vec<Product>> for Cart {
    fn from(items: Vec<Product>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            cart.upsert(item);
        }
        cart
    }
}

impl From<Cart> for Vec<Product> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
