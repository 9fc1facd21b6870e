//! Key-value persistence for the RocketShoes cart.
//!
//! The cart is persisted as one JSON string under one key, the way a browser
//! storefront uses local storage. This crate provides the seam and its
//! backends:
//!
//! - [`MemoryStore`] for tests and ephemeral sessions
//! - [`FileStore`] on native targets
//! - [`Cache`] (Spin Key-Value Store) on `wasm32`
//!
//! # Example
//!
//! ```rust
//! use rocket_cache::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set_item("@RocketShoes:cart", "[]").unwrap();
//! assert_eq!(store.get_item("@RocketShoes:cart").unwrap().as_deref(), Some("[]"));
//! ```

mod error;
#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod kv;
mod store;

pub use error::CacheError;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use kv::Cache;
pub use store::{KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CacheError, KeyValueStore, MemoryStore};
}
