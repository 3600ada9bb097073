//! DummyJSON demo API client.
//!
//! A typed layer over the REST endpoints the admin panel uses, with a
//! request cache in front of the read calls.
//!
//! # Caching
//!
//! Read responses are cached for five minutes, keyed by operation and
//! parameters. Concurrent fetches for the same key are not coalesced; the
//! last response to arrive wins, which is fine because responses for one
//! key are interchangeable within the TTL. Mutations invalidate the keys
//! they make stale.
//!
//! # The demo backend
//!
//! DummyJSON accepts create, update and delete calls and answers with
//! plausible bodies, but persists nothing. Callers must not treat a
//! successful write as something a later read will reflect.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shopdesk_core::{ProductDraft, ProductId};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::DummyJsonConfig;

pub mod cache;
pub mod types;

use cache::{CacheKey, CacheValue};
use types::{DeletedProduct, Product, ProductPage, ProductPayload, UserPage};

/// Read-cache time to live.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Maximum number of cached responses.
const CACHE_MAX_CAPACITY: u64 = 1000;

/// Errors from the DummyJSON API client.
#[derive(Debug, Error)]
pub enum DummyJsonError {
    /// Network or protocol failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error body shape the API uses for failures.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the DummyJSON REST API.
///
/// Cheap to clone; the HTTP connection pool and the cache are shared.
#[derive(Clone)]
pub struct DummyJsonClient {
    inner: Arc<DummyJsonClientInner>,
}

struct DummyJsonClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for DummyJsonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DummyJsonClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl DummyJsonClient {
    /// Create a new client.
    #[must_use]
    pub fn new(config: &DummyJsonConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_MAX_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(DummyJsonClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    // =========================================================================
    // Read operations (cached)
    // =========================================================================

    /// Fetch the product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with a
    /// non-success status.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<ProductPage, DummyJsonError> {
        let key = CacheKey::Products;
        if let Some(CacheValue::Products(page)) = self.inner.cache.get(&key).await {
            debug!("Product listing cache hit");
            return Ok(page);
        }

        let page: ProductPage = self.get("/products").await?;
        self.inner
            .cache
            .insert(key, CacheValue::Products(page.clone()))
            .await;
        Ok(page)
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `DummyJsonError::NotFound` if the id does not exist.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, DummyJsonError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Product cache hit");
            return Ok(*product);
        }

        let product: Product = self.get(&format!("/products/{id}")).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Fetch one page of users.
    ///
    /// Each `(limit, skip)` pair is cached on its own; paging back and
    /// forth does not refetch pages already seen.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with a
    /// non-success status.
    #[instrument(skip(self))]
    pub async fn get_users(&self, limit: i64, skip: i64) -> Result<UserPage, DummyJsonError> {
        let key = CacheKey::Users { limit, skip };
        if let Some(CacheValue::Users(page)) = self.inner.cache.get(&key).await {
            debug!("User page cache hit");
            return Ok(page);
        }

        let page: UserPage = self
            .get(&format!("/users?limit={limit}&skip={skip}"))
            .await?;
        self.inner
            .cache
            .insert(key, CacheValue::Users(page.clone()))
            .await;
        Ok(page)
    }

    // =========================================================================
    // Write operations (invalidate affected cache keys)
    // =========================================================================

    /// Create a product.
    ///
    /// The demo API answers with the payload echoed back under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the payload.
    #[instrument(skip(self, draft))]
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, DummyJsonError> {
        let payload = ProductPayload::from(draft);
        let product: Product = self.post("/products/add", &payload).await?;
        self.inner.cache.invalidate(&CacheKey::Products).await;
        Ok(product)
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns `DummyJsonError::NotFound` if the id does not exist.
    #[instrument(skip(self, draft), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, DummyJsonError> {
        let payload = ProductPayload::from(draft);
        let product: Product = self.put(&format!("/products/{id}"), &payload).await?;
        self.invalidate_product(id).await;
        Ok(product)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `DummyJsonError::NotFound` if the id does not exist.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<DeletedProduct, DummyJsonError> {
        let deleted: DeletedProduct = self.delete(&format!("/products/{id}")).await?;
        self.invalidate_product(id).await;
        Ok(deleted)
    }

    /// Drop a product and the listing that contains it from the cache.
    async fn invalidate_product(&self, id: ProductId) {
        self.inner.cache.invalidate(&CacheKey::Product(id)).await;
        self.inner.cache.invalidate(&CacheKey::Products).await;
    }

    // =========================================================================
    // HTTP helpers
    // =========================================================================

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DummyJsonError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DummyJsonError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self.inner.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DummyJsonError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self.inner.client.put(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, DummyJsonError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self.inner.client.delete(&url).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, DummyJsonError> {
        if response.status().is_success() {
            return response.json().await.map_err(Into::into);
        }
        Err(Self::parse_error(response).await)
    }

    /// Parse an error response into a typed error.
    ///
    /// The API reports failures as `{"message": "..."}`; fall back to the
    /// raw body when it does not.
    async fn parse_error(response: reqwest::Response) -> DummyJsonError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);

        if status == 404 {
            return DummyJsonError::NotFound(message);
        }
        DummyJsonError::Api { status, message }
    }
}
