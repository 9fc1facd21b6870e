//! Leptos integration.
//!
//! The store is provided once near the root of the view tree and every page
//! component underneath retrieves the same instance.
//!
//! ```rust,ignore
//! #[component]
//! fn App() -> impl IntoView {
//!     provide_cart(Arc::new(CartStore::new(api, storage, notifier)));
//!     view! { <ProductList/> <CartBadge/> }
//! }
//!
//! #[component]
//! fn CartBadge() -> impl IntoView {
//!     let store = use_cart::<Api, Storage, Toasts>().expect("cart provided");
//!     view! { <span>{store.cart().item_count()}</span> }
//! }
//! ```

use std::sync::Arc;

use leptos::prelude::{provide_context, use_context};

use crate::store::CartStore;

/// Make `store` available to the current owner and its descendants.
pub fn provide_cart<A, S, N>(store: Arc<CartStore<A, S, N>>)
where
    A: Send + Sync + 'static,
    S: Send + Sync + 'static,
    N: Send + Sync + 'static,
{
    provide_context(store);
}

/// The store provided by an ancestor, if any.
pub fn use_cart<A, S, N>() -> Option<Arc<CartStore<A, S, N>>>
where
    A: Send + Sync + 'static,
    S: Send + Sync + 'static,
    N: Send + Sync + 'static,
{
    use_context::<Arc<CartStore<A, S, N>>>()
}
