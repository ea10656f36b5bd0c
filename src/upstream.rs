//! Upstream HTTP clients: the generic JSON API and the search API.
//!
//! One shared `reqwest::Client` serves both call shapes, built with hard
//! connect/total timeouts (500ms each by default) so a slow upstream can
//! never stall a handler indefinitely. DNS resolution goes through the
//! hickory caching resolver (see `Cargo.toml` features), bounding
//! stale-DNS exposure without per-call resolution cost.
//!
//! The two paths fail differently on purpose:
//!
//! - the **generic** path masks transport failures into a success-shaped
//!   `(200, {"error":"Empty response from API"})` result, so transport
//!   noise never reaches the client's 500 path (and the masked result is
//!   cacheable upstream of here);
//! - the **search** path surfaces failures: non-200 replies keep their
//!   status with a `Request failed` envelope, send-level failures report
//!   status 0, and a body-read failure after a 200 maps to a bare 500.
//!
//! No retries on either path.

use std::time::Duration;

use reqwest::{Client, StatusCode, header};
use tracing::warn;

use crate::telemetry;
use crate::types::{GatewayResponse, Payload, error_body};
use crate::{HermodError, Result};

/// Canned body substituted when the generic API returns nothing.
pub(crate) const EMPTY_RESPONSE_BODY: &str = r#"{"error":"Empty response from API"}"#;

/// Content type sent on every upstream call.
const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Client for both upstream APIs.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    json_api_url: String,
    search_api_url: String,
}

impl UpstreamClient {
    /// Build a client over the two upstream base URLs.
    ///
    /// `connect_timeout` and `timeout` bound connection establishment and
    /// the whole call respectively.
    pub fn new(
        json_api_url: impl Into<String>,
        search_api_url: impl Into<String>,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| HermodError::Http(e.to_string()))?;

        Ok(Self {
            http,
            json_api_url: json_api_url.into(),
            search_api_url: search_api_url.into(),
        })
    }

    /// `POST {json_api_url}?action={action}` with the forwarded payload as
    /// JSON body.
    ///
    /// Always returns a response-shaped result: the status defaults to 200
    /// and the body to [`EMPTY_RESPONSE_BODY`] when the transport yields
    /// nothing. The masked failure is warn-logged and counted.
    pub async fn generic(&self, action: &str, payload: &Payload) -> GatewayResponse {
        let url = format!("{}?action={}", self.json_api_url, action);
        // Map<String, Value> serialization is infallible.
        let body = serde_json::to_string(payload).unwrap_or_default();

        let sent = self
            .http
            .post(&url)
            .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(body)
            .send()
            .await;

        match sent {
            Ok(resp) => {
                let status = resp.status().as_u16();
                metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL,
                    "target" => "generic", "status" => "ok")
                .increment(1);
                let text = resp.text().await.unwrap_or_default();
                let body = if text.is_empty() {
                    EMPTY_RESPONSE_BODY.to_string()
                } else {
                    text
                };
                GatewayResponse::new(status, body)
            }
            Err(err) => {
                warn!(action, error = %err, "generic upstream transport failure, masking as empty response");
                metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL,
                    "target" => "generic", "status" => "error")
                .increment(1);
                GatewayResponse::new(200, EMPTY_RESPONSE_BODY)
            }
        }
    }

    /// `GET {search_api_url}/search?query=..&limit=..&offset=..`.
    ///
    /// `query` is URL-encoded by reqwest. `limit` and `offset` are passed
    /// as the client wrote them (or their defaults).
    pub async fn search(&self, query: &str, limit: &str, offset: &str) -> GatewayResponse {
        let url = format!("{}/search", self.search_api_url);

        let sent = self
            .http
            .get(&url)
            .query(&[("query", query), ("limit", limit), ("offset", offset)])
            .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON)
            .send()
            .await;

        match sent {
            Ok(resp) if resp.status() == StatusCode::OK => {
                metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL,
                    "target" => "search", "status" => "ok")
                .increment(1);
                match resp.text().await {
                    Ok(body) => GatewayResponse::new(200, body),
                    // Body read failed after a 200 status: the distinct
                    // exception path, a bare 500 with the message.
                    Err(err) => {
                        warn!(error = %err, "search upstream body read failed");
                        GatewayResponse::new(500, error_body(&err.to_string()))
                    }
                }
            }
            Ok(resp) => {
                let status = resp.status().as_u16();
                warn!(status, "search upstream returned non-200");
                metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL,
                    "target" => "search", "status" => "error")
                .increment(1);
                // Transport itself succeeded, so the transport error slot
                // is empty.
                GatewayResponse::new(status, request_failed_body(""))
            }
            Err(err) => {
                // No response at all; status 0 mirrors a transport that
                // reported nothing.
                let status = err.status().map(|s| s.as_u16()).unwrap_or(0);
                warn!(error = %err, "search upstream transport failure");
                metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL,
                    "target" => "search", "status" => "error")
                .increment(1);
                GatewayResponse::new(status, request_failed_body(&err.to_string()))
            }
        }
    }
}

/// `{"error":"Request failed","curl_error":<message>}` envelope for failed
/// search calls.
fn request_failed_body(transport_error: &str) -> String {
    serde_json::json!({
        "error": "Request failed",
        "curl_error": transport_error,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_body_carries_message() {
        let body: serde_json::Value =
            serde_json::from_str(&request_failed_body("connection refused")).unwrap();
        assert_eq!(body["error"], "Request failed");
        assert_eq!(body["curl_error"], "connection refused");
    }

    #[test]
    fn empty_response_body_is_valid_json() {
        let body: serde_json::Value = serde_json::from_str(EMPTY_RESPONSE_BODY).unwrap();
        assert_eq!(body["error"], "Empty response from API");
    }
}
