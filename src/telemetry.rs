//! Telemetry metric name constants.
//!
//! Centralised metric names for hermod operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `hermod_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `action` — requested action name (e.g. "articles", "search")
//! - `target` — upstream called: "generic" or "search"
//! - `status` — outcome: "ok" or "error"

/// Total requests handled by the orchestrator.
///
/// Labels: `action`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "hermod_requests_total";

/// Total cache hits.
pub const CACHE_HITS_TOTAL: &str = "hermod_cache_hits_total";

/// Total cache misses.
pub const CACHE_MISSES_TOTAL: &str = "hermod_cache_misses_total";

/// Total upstream calls issued.
///
/// Labels: `target` ("generic" | "search"), `status` ("ok" | "error").
/// Transport failures count as "error" even when the generic path masks
/// them into a success-shaped response.
pub const UPSTREAM_REQUESTS_TOTAL: &str = "hermod_upstream_requests_total";
