//! The cart store.
//!
//! Holds the session's cart, applies the three shopper mutations against a
//! live stock check, and persists the whole list after every successful
//! mutation. Failures never reach the caller: each one is logged and handed
//! to the [`Notifier`] as a single [`Notification`].
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_commerce::prelude::*;
//! use rocket_cache::MemoryStore;
//!
//! let store = CartStore::new(
//!     HttpCatalogApi::with_base_url("http://localhost:3333"),
//!     MemoryStore::new(),
//!     LogNotifier,
//! );
//!
//! store.add_product(ProductId::new(1)).await;
//! store
//!     .update_product_amount(UpdateProductAmount::new(ProductId::new(1), 3))
//!     .await;
//! store.remove_product(ProductId::new(1));
//! ```

use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use rocket_cache::{CacheError, KeyValueStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::CatalogApi;
use crate::cart::Cart;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::notify::{CartOperation, Notification, NotificationKind, Notifier};

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Arguments of [`CartStore::update_product_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }
}

/// Session cart backed by a catalog API, a key-value sink and a notifier.
///
/// Mutations take `&self` so one store can be shared (typically behind an
/// `Arc`) by every consumer in the session. Each mutation works on a snapshot
/// taken when it starts; the lock is never held across a fetch. Two
/// overlapping mutations can therefore both start from the same snapshot and
/// the later commit wins.
pub struct CartStore<A, S, N> {
    api: A,
    storage: S,
    notifier: N,
    storage_key: String,
    cart: RwLock<Cart>,
}

impl<A, S, N> CartStore<A, S, N>
where
    A: CatalogApi,
    S: KeyValueStore,
    N: Notifier,
{
    /// Create the store, restoring any cart persisted under
    /// [`CART_STORAGE_KEY`].
    pub fn new(api: A, storage: S, notifier: N) -> Self {
        Self::with_storage_key(api, storage, notifier, CART_STORAGE_KEY)
    }

    /// Create the store with a custom storage key.
    ///
    /// A missing, unreadable or malformed stored value starts an empty cart.
    pub fn with_storage_key(api: A, storage: S, notifier: N, key: impl Into<String>) -> Self {
        let storage_key = key.into();
        let cart = load_cart(&storage, &storage_key);
        debug!(key = %storage_key, items = cart.len(), "cart store initialized");

        Self {
            api,
            storage,
            notifier,
            storage_key,
            cart: RwLock::new(cart),
        }
    }

    /// Snapshot of the current cart.
    pub fn cart(&self) -> Cart {
        self.read().clone()
    }

    /// Key the cart is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Add one unit of a product.
    ///
    /// An existing entry is incremented, a new one is appended with amount 1.
    /// Either way the resulting amount must stay below the current stock.
    pub async fn add_product(&self, product_id: ProductId) {
        debug!(%product_id, "adding product to cart");
        if let Err(error) = self.try_add_product(product_id).await {
            self.report(CartOperation::Add, product_id, &error);
        }
    }

    /// Remove a product's entry. Removing an absent product is not an error.
    pub fn remove_product(&self, product_id: ProductId) {
        debug!(%product_id, "removing product from cart");
        if let Err(error) = self.try_remove_product(product_id) {
            self.report(CartOperation::Remove, product_id, &error);
        }
    }

    /// Set a product's amount exactly.
    ///
    /// Amounts below 1 are ignored. The amount must stay below the current
    /// stock.
    pub async fn update_product_amount(&self, update: UpdateProductAmount) {
        debug!(product_id = %update.product_id, amount = update.amount, "updating product amount");
        if let Err(error) = self.try_update_product_amount(update).await {
            self.report(CartOperation::UpdateAmount, update.product_id, &error);
        }
    }

    /// Empty the cart, e.g. after checkout.
    pub fn clear(&self) {
        debug!("clearing cart");
        if let Err(error) = self.commit(Cart::new()) {
            warn!(%error, operation = %CartOperation::Clear, "cart mutation failed");
            self.notifier.notify(&Notification::new(
                NotificationKind::for_failure(CartOperation::Clear, &error),
                None,
            ));
        }
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let mut next = self.cart();
        let existing = next.contains(product_id);
        let requested = next.amount_of(product_id) + 1;

        let stock = self.api.stock(product_id).await?;
        if !stock.allows(requested) {
            return Err(CartError::OutOfStock {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        if existing {
            next.set_amount(product_id, requested);
        } else {
            let product = self.api.product(product_id).await?;
            next.upsert(product.with_amount(1));
        }

        self.commit(next)
    }

    fn try_remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let mut next = self.cart();
        if !next.remove(product_id) {
            debug!(%product_id, "product not in cart");
        }
        self.commit(next)
    }

    async fn try_update_product_amount(
        &self,
        UpdateProductAmount { product_id, amount }: UpdateProductAmount,
    ) -> Result<(), CartError> {
        if amount < 1 {
            debug!(%product_id, amount, "ignoring non-positive amount");
            return Ok(());
        }

        let mut next = self.cart();
        let stock = self.api.stock(product_id).await?;
        if !stock.allows(amount) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        if !next.set_amount(product_id, amount) {
            debug!(%product_id, "product not in cart");
        }
        self.commit(next)
    }

    /// Persist `next`, then make it the current cart.
    fn commit(&self, next: Cart) -> Result<(), CartError> {
        self.storage.set_json(&self.storage_key, &next)?;

        info!(items = next.len(), units = next.item_count(), "cart saved");
        *self.cart.write().unwrap_or_else(PoisonError::into_inner) = next;
        Ok(())
    }

    fn report(&self, operation: CartOperation, product_id: ProductId, error: &CartError) {
        match error {
            CartError::OutOfStock {
                requested,
                available,
                ..
            } => warn!(%product_id, %operation, requested, available, "stock limit reached"),
            _ => warn!(%product_id, %operation, %error, "cart mutation failed"),
        }

        let kind = NotificationKind::for_failure(operation, error);
        self.notifier.notify(&Notification::new(kind, Some(product_id)));
    }

    fn read(&self) -> RwLockReadGuard<'_, Cart> {
        self.cart.read().unwrap_or_else(PoisonError::into_inner)
    }
}

fn load_cart<S: KeyValueStore>(storage: &S, key: &str) -> Cart {
    match storage.get_json(key) {
        Ok(cart) => cart.unwrap_or_default(),
        Err(error @ CacheError::SerializeError(_)) => {
            warn!(key, %error, "discarding malformed stored cart");
            Cart::new()
        }
        Err(error) => {
            warn!(key, %error, "could not read stored cart");
            Cart::new()
        }
    }
}
