//! Cache-around-dispatch orchestration.
//!
//! [`Gateway::handle`] is the single entry point: it derives the cache key
//! from the payload as received, consults the store, and only on a miss
//! walks the action router and the upstream client, writing the result
//! back per the caching policy below. The surrounding listener (or any
//! embedder) calls `handle`, then [`normalize`](crate::normalize::normalize)s
//! the pair and echoes its status code.

mod builder;

pub use builder::{GatewayBuilder, Hermod};

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::cache::{self, CacheStore};
use crate::router::{self, Action, SEARCH_DEFAULT_LIMIT, SEARCH_DEFAULT_OFFSET};
use crate::telemetry;
use crate::types::{GatewayResponse, Payload};
use crate::upstream::UpstreamClient;

/// The request gateway: validation, routing, caching, upstream calls.
///
/// Cheap to share behind an `Arc`; one instance serves all concurrent
/// request handlers. Construct via [`Hermod::builder()`].
pub struct Gateway {
    upstream: UpstreamClient,
    cache: Arc<dyn CacheStore>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway").finish_non_exhaustive()
    }
}

impl Gateway {
    pub(crate) fn new(upstream: UpstreamClient, cache: Arc<dyn CacheStore>) -> Self {
        Self { upstream, cache }
    }

    /// Handle one inbound request payload.
    ///
    /// Side effects: one cache read, zero or one upstream call, zero or
    /// one cache write. Never fails — every error mode is folded into the
    /// returned status/body pair.
    ///
    /// Caching policy:
    /// - missing `action` key: 400, bypasses the cache entirely
    /// - field-validation 400s: computed fresh every time, never stored
    /// - unknown action ("Wrong action" 400): stored like a success
    /// - generic-path results: stored whatever the status, masked
    ///   transport failures included
    /// - search-path results: stored only on 200
    pub async fn handle(&self, payload: &Payload) -> GatewayResponse {
        // A null action counts as absent, same as the field-presence rules
        // in the router.
        let action_value = payload.get("action").filter(|v| !v.is_null());
        let Some(action_value) = action_value else {
            metrics::counter!(telemetry::REQUESTS_TOTAL,
                "action" => "none", "status" => "error")
            .increment(1);
            return GatewayResponse::client_error("Action not specified");
        };

        // Key over the payload as received, before any default injection.
        let key = cache::cache_key(payload);

        if let Some(hit) = self.cache.get(key).await {
            debug!(key, "cache hit");
            metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
            return hit;
        }
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);

        // A non-string action value falls through to the unknown-action
        // branch, same as an unrecognized name.
        let name = action_value.as_str().unwrap_or_default();
        debug!(action = name, key, "cache miss, dispatching");

        let (response, cacheable) = self.dispatch(name, payload).await;
        if cacheable {
            self.cache.insert(key, response.clone()).await;
        }

        let status = if response.is_success() { "ok" } else { "error" };
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "action" => name.to_string(), "status" => status)
        .increment(1);
        response
    }

    /// Route to the upstream target, returning the response and whether it
    /// may be written to the cache.
    async fn dispatch(&self, name: &str, payload: &Payload) -> (GatewayResponse, bool) {
        let Some(action) = Action::from_name(name) else {
            // Unknown actions are cached once computed, like any dispatch
            // result; only validation failures stay uncached.
            return (GatewayResponse::client_error("Wrong action"), true);
        };

        if let Err(message) = action.validate(payload) {
            return (GatewayResponse::client_error(message), false);
        }

        if action.is_search() {
            let query = router::query_param(payload, "query", "");
            let limit = router::query_param(payload, "limit", SEARCH_DEFAULT_LIMIT);
            let offset = router::query_param(payload, "offset", SEARCH_DEFAULT_OFFSET);
            let response = self.upstream.search(&query, &limit, &offset).await;
            let cacheable = response.is_success();
            (response, cacheable)
        } else {
            let forwarded = action.forwarded_payload(payload);
            let response = self.upstream.generic(action.name(), &forwarded).await;
            (response, true)
        }
    }

    /// Convenience: handle a raw JSON value, treating non-object bodies as
    /// an empty payload (which yields the missing-action error).
    pub async fn handle_value(&self, value: &Value) -> GatewayResponse {
        match value.as_object() {
            Some(map) => self.handle(map).await,
            None => self.handle(&Payload::new()).await,
        }
    }
}
