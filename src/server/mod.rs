//! HTTP listener for the gateway.
//!
//! A thin axum surface over [`Gateway::handle`]: parse the request body as
//! JSON, hand the object to the gateway, echo the handler's status code
//! with the normalized JSON body. Standing CORS headers
//! (`Access-Control-Allow-Origin: *`, methods POST/GET/OPTIONS/PUT/DELETE,
//! header `Content-Type`) are emitted by `tower-http`'s [`CorsLayer`],
//! which also answers `OPTIONS` preflights without a body.

pub mod config;

pub use config::Config;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::gateway::Gateway;
use crate::normalize::normalize;

/// Build the router for a gateway instance.
pub fn app(gateway: Arc<Gateway>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::POST,
            Method::GET,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", post(handle_request))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(gateway)
}

/// POST / — the single gateway endpoint.
///
/// An unparseable or non-object body degrades to an empty payload, which
/// the gateway answers with the missing-action error.
async fn handle_request(
    State(gateway): State<Arc<Gateway>>,
    body: Bytes,
) -> impl IntoResponse {
    let value: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let response = gateway.handle_value(&value).await;
    let normalized = normalize(response.http_code, &response.body);

    // Status 0 (search transport failure) has no HTTP representation, so
    // 500 is substituted on the wire. The body keeps the normalizer's
    // default-arm text ("An unexpected error occurred"), not the 500
    // arm's: normalization ran on the handler's own code, and the
    // substitution is transport-only.
    let status =
        StatusCode::from_u16(response.http_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(normalized))
}

/// GET /healthz — liveness probe.
async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
