//! Shopping cart for the RocketShoes storefront.
//!
//! This crate holds the cart state of a shopper session:
//!
//! - **Catalog**: [`Product`] and [`Stock`] as served by the storefront API
//! - **Cart**: the ordered list of products with quantities, plus a priced
//!   [`CartSummary`]
//! - **Store**: [`CartStore`], which validates every mutation against live
//!   stock, persists the cart and reports failures to a [`Notifier`]
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_commerce::prelude::*;
//! use rocket_cache::FileStore;
//!
//! let store = CartStore::new(
//!     HttpCatalogApi::with_base_url("http://localhost:3333"),
//!     FileStore::open(".rocketcart/cart.json")?,
//!     LogNotifier,
//! );
//!
//! store.add_product(ProductId::new(1)).await;
//!
//! let summary = store.cart().summary(Currency::BRL)?;
//! println!("Total: {}", summary.total.display());
//! ```

pub mod api;
pub mod cart;
pub mod catalog;
#[cfg(feature = "leptos")]
pub mod context;
pub mod error;
pub mod ids;
pub mod money;
pub mod notify;
pub mod store;

pub use api::{CatalogApi, HttpCatalogApi, InMemoryCatalog};
pub use cart::{Cart, CartSummary, SummaryLine};
pub use catalog::{Product, Stock};
pub use error::CartError;
pub use ids::ProductId;
pub use money::{Currency, Money};
pub use notify::{
    CartOperation, CollectingNotifier, FnNotifier, LogNotifier, Notification, NotificationKind,
    Notifier,
};
pub use store::{CartStore, UpdateProductAmount, CART_STORAGE_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{CatalogApi, HttpCatalogApi, InMemoryCatalog};
    pub use crate::cart::{Cart, CartSummary, SummaryLine};
    pub use crate::catalog::{Product, Stock};
    #[cfg(feature = "leptos")]
    pub use crate::context::{provide_cart, use_cart};
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};
    pub use crate::notify::{
        CollectingNotifier, FnNotifier, LogNotifier, Notification, NotificationKind, Notifier,
    };
    pub use crate::store::{CartStore, UpdateProductAmount, CART_STORAGE_KEY};
}
