//! Integration tests for [`UpstreamClient`] — the two call shapes and
//! their asymmetric failure handling, against wiremock.

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hermod::{Payload, UpstreamClient};

const TIMEOUT: Duration = Duration::from_millis(500);

fn client(json_api: &str, search_api: &str) -> UpstreamClient {
    UpstreamClient::new(json_api, search_api, TIMEOUT, TIMEOUT).expect("client should build")
}

fn payload(pairs: &[(&str, Value)]) -> Payload {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

// =============================================================================
// Generic call shape
// =============================================================================

#[tokio::test]
async fn generic_posts_payload_with_action_tag() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(query_param("action", "properties"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .and(body_json(json!({ "action": "properties", "block_id": "5" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "props": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server.uri(), "http://127.0.0.1:1");
    let p = payload(&[("action", json!("properties")), ("block_id", json!("5"))]);
    let response = client.generic("properties", &p).await;

    assert_eq!(response.http_code, 200);
    assert_eq!(response.body, r#"{"props":{}}"#);
}

#[tokio::test]
async fn generic_empty_body_substitutes_canned_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client(&server.uri(), "http://127.0.0.1:1");
    let response = client.generic("news", &Payload::new()).await;

    assert_eq!(response.http_code, 200);
    assert_eq!(response.body, r#"{"error":"Empty response from API"}"#);
}

#[tokio::test]
async fn generic_preserves_upstream_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&server)
        .await;

    let client = client(&server.uri(), "http://127.0.0.1:1");
    let response = client.generic("news", &Payload::new()).await;

    assert_eq!(response.http_code, 404);
    assert_eq!(response.body, "nope");
}

#[tokio::test]
async fn generic_transport_failure_masked_as_success() {
    let client = client("http://127.0.0.1:1", "http://127.0.0.1:1");
    let response = client.generic("news", &Payload::new()).await;

    assert_eq!(response.http_code, 200);
    assert_eq!(response.body, r#"{"error":"Empty response from API"}"#);
}

#[tokio::test]
async fn generic_timeout_masked_as_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client(&server.uri(), "http://127.0.0.1:1");
    let response = client.generic("news", &Payload::new()).await;

    // The 500ms total timeout fires well before the 2s delay.
    assert_eq!(response.http_code, 200);
    assert_eq!(response.body, r#"{"error":"Empty response from API"}"#);
}

// =============================================================================
// Search call shape
// =============================================================================

#[tokio::test]
async fn search_gets_with_encoded_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "sol & sun"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hits": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client("http://127.0.0.1:1", &server.uri());
    let response = client.search("sol & sun", "10", "0").await;

    assert_eq!(response.http_code, 200);
    assert_eq!(response.body, r#"{"hits":[]}"#);
}

#[tokio::test]
async fn search_non_200_keeps_status_with_empty_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(404).set_body_string("ignored"))
        .mount(&server)
        .await;

    let client = client("http://127.0.0.1:1", &server.uri());
    let response = client.search("sun", "10", "0").await;

    assert_eq!(response.http_code, 404);
    let v: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(v["error"], "Request failed");
    // The transport itself succeeded, so the error slot is empty.
    assert_eq!(v["curl_error"], "");
}

#[tokio::test]
async fn search_transport_failure_is_status_zero_with_message() {
    let client = client("http://127.0.0.1:1", "http://127.0.0.1:1");
    let response = client.search("sun", "10", "0").await;

    assert_eq!(response.http_code, 0);
    let v: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(v["error"], "Request failed");
    assert!(!v["curl_error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn search_timeout_is_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client("http://127.0.0.1:1", &server.uri());
    let response = client.search("sun", "10", "0").await;

    assert_eq!(response.http_code, 0);
    let v: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(v["error"], "Request failed");
}
