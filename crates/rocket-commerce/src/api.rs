//! Catalog API seam.
//!
//! The store needs two reads from the storefront backend: the current stock
//! level of a product and the product's details.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use rocket_data::{FetchClient, FetchError};

use crate::catalog::{Product, Stock};
use crate::ids::ProductId;

/// Read access to the storefront's product and stock endpoints.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait CatalogApi {
    /// `GET /stock/{id}`
    async fn stock(&self, product_id: ProductId) -> Result<Stock, FetchError>;

    /// `GET /products/{id}`
    async fn product(&self, product_id: ProductId) -> Result<Product, FetchError>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<A: CatalogApi + Send + Sync + ?Sized> CatalogApi for Arc<A> {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, FetchError> {
        (**self).stock(product_id).await
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, FetchError> {
        (**self).product(product_id).await
    }
}

/// [`CatalogApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: FetchClient,
}

impl HttpCatalogApi {
    /// Use a client already pointed at the API's base URL.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// Shorthand for a default client with a base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(FetchClient::new().with_base_url(base_url))
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl CatalogApi for HttpCatalogApi {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, FetchError> {
        self.client.get_json(format!("/stock/{product_id}")).await
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, FetchError> {
        self.client.get_json(format!("/products/{product_id}")).await
    }
}

/// [`CatalogApi`] backed by maps, for tests, demos and offline sessions.
///
/// Unknown ids answer like the HTTP API does, with a 404.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    stock: RwLock<HashMap<ProductId, i64>>,
    offline: AtomicBool,
    stock_requests: AtomicUsize,
    product_requests: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product with its stock level.
    pub fn with_product(self, product: Product, stock: i64) -> Self {
        self.insert(product, stock);
        self
    }

    /// Register or replace a product with its stock level.
    pub fn insert(&self, product: Product, stock: i64) {
        self.set_stock(product.id, stock);
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product.id, product);
    }

    /// Change the stock level of a product.
    pub fn set_stock(&self, product_id: ProductId, amount: i64) {
        self.stock
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product_id, amount);
    }

    /// While offline every request fails as a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stock lookups served (or refused) so far.
    pub fn stock_requests(&self) -> usize {
        self.stock_requests.load(Ordering::SeqCst)
    }

    /// Number of product lookups served (or refused) so far.
    pub fn product_requests(&self) -> usize {
        self.product_requests.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), FetchError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(FetchError::RequestError("connection refused".to_string()));
        }
        Ok(())
    }
}

fn not_found(path: String) -> FetchError {
    FetchError::HttpError {
        status: 404,
        message: format!("{path} not found"),
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl CatalogApi for InMemoryCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, FetchError> {
        self.stock_requests.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        self.stock
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&product_id)
            .map(|amount| Stock::new(product_id, *amount))
            .ok_or_else(|| not_found(format!("/stock/{product_id}")))
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, FetchError> {
        self.product_requests.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&product_id)
            .cloned()
            .ok_or_else(|| not_found(format!("/products/{product_id}")))
    }
}
