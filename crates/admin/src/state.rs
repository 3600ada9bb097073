//! Shared application state.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::dummyjson::DummyJsonClient;

/// Shared application state, cheap to clone.
///
/// Wraps an `Arc` so the router can clone it per request without copying
/// the config or the API client's connection pool and cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: DummyJsonClient,
}

impl AppState {
    /// Build application state from configuration.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let api = DummyJsonClient::new(&config.api);
        Self {
            inner: Arc::new(AppStateInner { config, api }),
        }
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Caching DummyJSON API client.
    #[must_use]
    pub fn api(&self) -> &DummyJsonClient {
        &self.inner.api
    }
}
