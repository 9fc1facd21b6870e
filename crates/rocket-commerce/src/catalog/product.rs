//! Product type.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product as served by `GET /products/{id}` and as held in the cart.
///
/// Only `id` and `amount` matter to the cart. The display fields are carried
/// through untouched, and anything else the API returns is kept in `extra` so
/// it survives a round trip through storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub title: String,
    /// Unit price in major currency units, as the API reports it.
    #[serde(default)]
    pub price: f64,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Quantity held in the cart. Absent (zero) in catalog responses.
    #[serde(default)]
    pub amount: i64,
    /// Fields the cart does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Create a product with the given display fields and no cart quantity.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
            amount: 0,
            extra: serde_json::Map::new(),
        }
    }

    /// Return this product with the cart quantity replaced.
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_response_has_no_amount() {
        let json = r#"{
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/tenis1.jpg"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.amount, 0);
        assert!(product.extra.is_empty());
    }

    #[test]
    fn test_unknown_fields_survive_roundtrip() {
        let json = r#"{"id":2,"title":"Tênis","price":139.9,"image":"x.jpg","brand":"Rocket","sizes":[38,39]}"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.extra.get("brand"), Some(&serde_json::json!("Rocket")));

        let back: Product =
            serde_json::from_str(&serde_json::to_string(&product).unwrap()).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_with_amount() {
        let product = Product::new(ProductId::new(3), "Tênis", 99.9, "y.jpg").with_amount(1);
        assert_eq!(product.amount, 1);
    }
}
