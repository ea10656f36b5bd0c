//! Response normalization: collapse the (status, raw body) pair into the
//! final client-facing JSON envelope.
//!
//! Only 200 bodies pass through; every error status maps to a fixed small
//! vocabulary so arbitrary upstream status semantics never leak to the
//! client. The listener echoes the *input* status code alongside the
//! normalized body.

use serde_json::{Value, json};

/// Normalize an upstream (or locally generated) status/body pair.
///
/// - 200 → JSON-decoded body passed through verbatim; an undecodable body
///   becomes `null` rather than an error
/// - 404 → `{"error":"Content not found"}`
/// - 500 → `{"error":"Internal Server Error"}`
/// - anything else (including status 0) → `{"error":"An unexpected error occurred"}`
pub fn normalize(http_code: u16, raw_body: &str) -> Value {
    match http_code {
        200 => serde_json::from_str(raw_body).unwrap_or(Value::Null),
        404 => json!({ "error": "Content not found" }),
        500 => json!({ "error": "Internal Server Error" }),
        _ => json!({ "error": "An unexpected error occurred" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_body_passes_through_decoded() {
        assert_eq!(normalize(200, r#"{"a":1}"#), json!({ "a": 1 }));
    }

    #[test]
    fn ok_undecodable_body_becomes_null() {
        assert_eq!(normalize(200, "not json {{{"), Value::Null);
        assert_eq!(normalize(200, ""), Value::Null);
    }

    #[test]
    fn not_found_ignores_body() {
        let expected = json!({ "error": "Content not found" });
        assert_eq!(normalize(404, r#"{"detail":"whatever"}"#), expected);
        assert_eq!(normalize(404, ""), expected);
    }

    #[test]
    fn server_error() {
        assert_eq!(
            normalize(500, "boom"),
            json!({ "error": "Internal Server Error" })
        );
    }

    #[test]
    fn unknown_statuses_collapse() {
        let expected = json!({ "error": "An unexpected error occurred" });
        for code in [0, 201, 204, 301, 400, 403, 418, 502, 503] {
            assert_eq!(normalize(code, "{}"), expected, "code {code}");
        }
    }
}
