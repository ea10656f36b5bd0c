//! Response cache for the dispatch layer.
//!
//! The [`Gateway`](crate::Gateway) wraps every dispatch in a cache lookup
//! keyed on the full inbound payload: a hit short-circuits validation,
//! routing, and the upstream call entirely. Entries live for a fixed TTL
//! (300 seconds by default) and are never invalidated explicitly.
//!
//! The store is an injected capability ([`CacheStore`]) rather than a
//! module-level singleton, so tests can swap in a plain map or a spying
//! double and production can share one store across request handlers.
//! [`MokaStore`] is the default implementation: moka's future cache gives
//! concurrent-safe reads/writes with lazy per-entry expiry, no reaper
//! thread required. Last-writer-wins on key collision is acceptable —
//! duplicate upstream calls for the same uncached key are tolerated, not
//! deduplicated.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use crate::types::{GatewayResponse, Payload};

/// Default TTL for cached responses.
const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default maximum number of cached entries.
const DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Configuration for the response cache.
///
/// ```rust
/// # use hermod::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(50_000)
///     .ttl(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 10,000.
    pub max_entries: u64,
    /// Time-to-live for cached entries. Default: 300 seconds.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl: DEFAULT_TTL,
        }
    }
}

impl CacheConfig {
    /// Create a new config with the default TTL and capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Key→response store with per-entry TTL.
///
/// Must be safe for concurrent reads and writes across request handlers.
/// Implementations expire entries on their own schedule; `get` after the
/// TTL must return `None`.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a cached response. `None` on miss or expired entry.
    async fn get(&self, key: u64) -> Option<GatewayResponse>;

    /// Insert (or overwrite) a response under `key`.
    async fn insert(&self, key: u64, response: GatewayResponse);
}

/// In-memory TTL cache backed by moka.
pub struct MokaStore {
    cache: Cache<u64, GatewayResponse>,
}

impl MokaStore {
    /// Create a store with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { cache }
    }
}

impl Default for MokaStore {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

#[async_trait]
impl CacheStore for MokaStore {
    async fn get(&self, key: u64) -> Option<GatewayResponse> {
        self.cache.get(&key).await
    }

    async fn insert(&self, key: u64, response: GatewayResponse) {
        self.cache.insert(key, response).await;
    }
}

/// Compute the cache key for an inbound payload.
///
/// The payload is serialized canonically (`serde_json::Map` keeps keys
/// sorted, so logically identical payloads serialize identically regardless
/// of insertion order) and hashed with `DefaultHasher` (SipHash). The key
/// is stable within a process lifetime, which is all an in-memory cache
/// needs; a distributed backend would want a cross-process digest instead.
///
/// Callers must derive the key from the payload as received, before any
/// per-action defaults are injected.
pub fn cache_key(payload: &Payload) -> u64 {
    // Map<String, Value> serialization is infallible: keys are strings and
    // Value has no non-serializable states.
    let canonical = serde_json::to_string(payload).unwrap_or_default();
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    hasher.finish()
}
