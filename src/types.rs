//! Core request/response types shared across the gateway.

use serde_json::Value;

/// Inbound request payload: a flat, string-keyed JSON object.
///
/// `serde_json::Map` is BTree-backed, so serializing a payload always
/// produces key-sorted JSON regardless of insertion order. The cache key
/// relies on this (see [`crate::cache::cache_key`]).
pub type Payload = serde_json::Map<String, Value>;

/// A status/body pair as produced by dispatch and stored in the cache.
///
/// `body` is the raw upstream (or locally generated) JSON text. It is not
/// parsed until [`normalize`](crate::normalize::normalize) shapes the final
/// client envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    /// HTTP status code to echo to the client. `0` means the transport
    /// reported no status at all (search-path transport failure).
    pub http_code: u16,
    /// Raw response body text.
    pub body: String,
}

impl GatewayResponse {
    /// Construct a response from a status code and body text.
    pub fn new(http_code: u16, body: impl Into<String>) -> Self {
        Self {
            http_code,
            body: body.into(),
        }
    }

    /// A 400 validation error with an `{"error": ...}` body.
    pub fn client_error(message: &str) -> Self {
        Self {
            http_code: 400,
            body: error_body(message),
        }
    }

    /// Whether this is a 200 response.
    pub fn is_success(&self) -> bool {
        self.http_code == 200
    }
}

/// Serialize `{"error": message}`.
pub(crate) fn error_body(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_error_shape() {
        let r = GatewayResponse::client_error("Wrong action");
        assert_eq!(r.http_code, 400);
        assert_eq!(r.body, r#"{"error":"Wrong action"}"#);
        assert!(!r.is_success());
    }

    #[test]
    fn payload_serialization_is_key_sorted() {
        let mut p = Payload::new();
        p.insert("zebra".into(), Value::from(1));
        p.insert("alpha".into(), Value::from(2));
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"alpha":2,"zebra":1}"#);
    }
}
