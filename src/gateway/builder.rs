//! Builder for configuring gateway instances.

use std::sync::Arc;
use std::time::Duration;

use super::Gateway;
use crate::cache::{CacheConfig, CacheStore, MokaStore};
use crate::upstream::UpstreamClient;
use crate::{HermodError, Result};

/// Default upstream connect timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Default upstream total-call timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

/// Main entry point for creating gateway instances.
pub struct Hermod;

impl Hermod {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }
}

/// Builder for configuring gateway instances.
///
/// Both upstream base URLs are required; everything else has defaults
/// (500ms timeouts, 300s cache TTL).
///
/// ```rust,no_run
/// # use hermod::Hermod;
/// # fn main() -> hermod::Result<()> {
/// let gateway = Hermod::builder()
///     .json_api_url("https://content.example.com/api")
///     .search_api_url("https://search.example.com")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct GatewayBuilder {
    json_api_url: Option<String>,
    search_api_url: Option<String>,
    connect_timeout: Duration,
    timeout: Duration,
    cache_config: CacheConfig,
    cache_store: Option<Arc<dyn CacheStore>>,
}

impl GatewayBuilder {
    pub fn new() -> Self {
        Self {
            json_api_url: None,
            search_api_url: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            cache_config: CacheConfig::default(),
            cache_store: None,
        }
    }

    /// Base URL of the generic JSON API (required).
    pub fn json_api_url(mut self, url: impl Into<String>) -> Self {
        self.json_api_url = Some(url.into());
        self
    }

    /// Base URL of the search API (required).
    pub fn search_api_url(mut self, url: impl Into<String>) -> Self {
        self.search_api_url = Some(url.into());
        self
    }

    /// Upstream connect timeout (default: 500ms).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Upstream total-call timeout (default: 500ms).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Cache TTL and capacity (default: 300s / 10,000 entries).
    ///
    /// Ignored when an explicit store is injected via
    /// [`cache_store`](Self::cache_store).
    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    /// Inject a cache store implementation.
    ///
    /// Production uses the default [`MokaStore`]; tests can swap in a
    /// plain map or a spying double.
    pub fn cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.cache_store = Some(store);
        self
    }

    /// Build the gateway.
    pub fn build(self) -> Result<Gateway> {
        let json_api_url = self
            .json_api_url
            .ok_or_else(|| HermodError::Configuration("json_api_url is required".into()))?;
        let search_api_url = self
            .search_api_url
            .ok_or_else(|| HermodError::Configuration("search_api_url is required".into()))?;

        let upstream = UpstreamClient::new(
            json_api_url,
            search_api_url,
            self.connect_timeout,
            self.timeout,
        )?;

        let cache = self
            .cache_store
            .unwrap_or_else(|| Arc::new(MokaStore::new(&self.cache_config)));

        Ok(Gateway::new(upstream, cache))
    }
}

impl Default for GatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_json_api_url() {
        let err = Hermod::builder()
            .search_api_url("http://search.test")
            .build()
            .unwrap_err();
        assert!(matches!(err, HermodError::Configuration(_)));
        assert!(err.to_string().contains("json_api_url"));
    }

    #[test]
    fn build_requires_search_api_url() {
        let err = Hermod::builder()
            .json_api_url("http://api.test")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("search_api_url"));
    }

    #[test]
    fn build_succeeds_with_both_urls() {
        let gateway = Hermod::builder()
            .json_api_url("http://api.test")
            .search_api_url("http://search.test")
            .build();
        assert!(gateway.is_ok());
    }
}
