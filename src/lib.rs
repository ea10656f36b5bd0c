//! Hermod — caching request gateway for content and search APIs.
//!
//! Hermod accepts a JSON action request, validates required parameters per
//! action, forwards the request to one of two upstream HTTP APIs (a
//! generic JSON API or a dedicated search API), caches the upstream
//! response for 300 seconds keyed by the full request payload, and
//! normalizes the status/response pair into a client-facing JSON envelope.
//!
//! # Example
//!
//! ```rust,no_run
//! use hermod::{Hermod, Payload, normalize};
//! use serde_json::Value;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> hermod::Result<()> {
//!     let gateway = Hermod::builder()
//!         .json_api_url("https://content.example.com/api")
//!         .search_api_url("https://search.example.com")
//!         .build()?;
//!
//!     let mut payload = Payload::new();
//!     payload.insert("action".into(), Value::from("articles"));
//!     payload.insert("block_id".into(), Value::from("42"));
//!
//!     let response = gateway.handle(&payload).await;
//!     let body = normalize(response.http_code, &response.body);
//!     println!("{} {}", response.http_code, body);
//!     Ok(())
//! }
//! ```
//!
//! The inbound HTTP surface (body parsing, CORS, preflight) lives behind
//! the `server` feature; embedders can instead call
//! [`Gateway::handle`] directly from their own listener.

pub mod cache;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod router;
#[cfg(feature = "server")]
pub mod server;
pub mod telemetry;
pub mod types;
pub mod upstream;

// Re-export main types at crate root
pub use cache::{CacheConfig, CacheStore, MokaStore, cache_key};
pub use error::{HermodError, Result};
pub use gateway::{Gateway, GatewayBuilder, Hermod};
pub use normalize::normalize;
pub use router::Action;
pub use types::{GatewayResponse, Payload};
pub use upstream::UpstreamClient;
