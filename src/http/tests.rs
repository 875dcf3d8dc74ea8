//! Tests for HTTP module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::types::Method;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The blocking client must live outside the async runtime
async fn blocking<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    tokio::task::spawn_blocking(f).await.unwrap()
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_default() {
    let config = HttpClientConfig::default();
    assert!(config.base_url.is_none());
    assert_eq!(config.timeout.as_secs(), 30);
    assert!(config.user_agent.starts_with("pagerelay/"));
}

#[test]
fn test_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(std::time::Duration::from_secs(5))
        .header("X-Client", "relay")
        .user_agent("custom/1.0")
        .build();

    assert_eq!(config.base_url.as_deref(), Some("https://api.example.com"));
    assert_eq!(config.timeout.as_secs(), 5);
    assert_eq!(
        config.default_headers.get("X-Client"),
        Some(&"relay".to_string())
    );
    assert_eq!(config.user_agent, "custom/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("offset", "0")
        .header("Accept", "application/json")
        .json(json!({"a": 1}));
    assert_eq!(config.query.get("offset"), Some(&"0".to_string()));
    assert_eq!(
        config.headers.get("Accept"),
        Some(&"application/json".to_string())
    );
    assert!(config.body.is_some());
}

#[test]
fn test_build_url() {
    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .base_url("https://api.example.com/v1/")
            .build(),
    )
    .unwrap();

    assert_eq!(client.build_url("/items"), "https://api.example.com/v1/items");
    assert_eq!(client.build_url("items"), "https://api.example.com/v1/items");
    assert_eq!(
        client.build_url("https://other.example.com/x"),
        "https://other.example.com/x"
    );
}

// ============================================================================
// Request Tests
// ============================================================================

#[tokio::test]
async fn test_get_json_with_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [1, 2]})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let body: Value = blocking(move || {
        let client = HttpClient::with_config(HttpClientConfig::builder().base_url(uri).build())?;
        client.get_json_with_config("/items", RequestConfig::new().query("offset", "10"))
    })
    .await
    .unwrap();

    assert_eq!(body["items"], json!([1, 2]));
}

#[tokio::test]
async fn test_default_headers_and_auth_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secure"))
        .and(header("X-Client", "relay"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let body: Value = blocking(move || {
        let config = HttpClientConfig::builder()
            .base_url(uri)
            .header("X-Client", "relay")
            .build();
        let client = HttpClient::with_auth(
            config,
            AuthConfig::Bearer {
                token: "tok".to_string(),
            },
        )?;
        client.get_json_with_config("/secure", RequestConfig::new())
    })
    .await
    .unwrap();

    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/publish"))
        .and(body_json(json!([{"n": 1}])))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/publish", server.uri());
    let status = blocking(move || {
        let client = HttpClient::new()?;
        client
            .request(
                Method::POST,
                &url,
                RequestConfig::new().json(json!([{"n": 1}])),
            )
            .map(|response| response.status().as_u16())
    })
    .await
    .unwrap();

    assert_eq!(status, 202);
}

#[tokio::test]
async fn test_error_status_is_reported_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/broken", server.uri());
    let err = blocking(move || {
        let client = HttpClient::new()?;
        client.request(Method::PUT, &url, RequestConfig::new().json(json!({})))
    })
    .await
    .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/garbage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let url = format!("{}/garbage", server.uri());
    let result: crate::error::Result<Value> = blocking(move || {
        let client = HttpClient::new()?;
        client.get_json_with_config(&url, RequestConfig::new())
    })
    .await;

    assert!(matches!(result, Err(Error::JsonParse(_))));
}

#[test]
fn test_unparseable_url_is_http_error() {
    let client = HttpClient::new().unwrap();
    let result = client.request(Method::GET, "not a url", RequestConfig::new());
    assert!(matches!(result, Err(Error::Http(_))));
}
