//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn plain_client() -> HttpClient {
    HttpClient::with_config(HttpClientConfig::default()).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.credentials.is_none());
    assert_eq!(
        config.user_agent,
        format!("cibuild-etl/{}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .header("Accept", "application/json")
        .credentials(Credentials::token("abc"))
        .build();

    assert_eq!(
        config.default_headers.get("Accept"),
        Some(&"application/json".to_string())
    );
    assert!(config.credentials.is_some());
}

#[test]
fn test_request_config_keeps_query_order() {
    let config = RequestConfig::new().query("limit", 100).query("offset", 0);

    assert_eq!(
        config.query,
        vec![
            ("limit".to_string(), "100".to_string()),
            ("offset".to_string(), "0".to_string())
        ]
    );
}

#[test]
fn test_credentials_debug_is_redacted() {
    let debug = format!("{:?}", Credentials::token("very-secret"));
    assert!(!debug.contains("very-secret"));
}

#[tokio::test]
async fn test_get_json_with_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"build_num": 1}
        ])))
        .mount(&mock_server)
        .await;

    let data: Value = plain_client()
        .get_json_with_config(
            &format!("{}/api/search", mock_server.uri()),
            RequestConfig::new().query("limit", 5).query("offset", 0),
        )
        .await
        .unwrap();

    assert_eq!(data[0]["build_num"], 1);
}

#[tokio::test]
async fn test_basic_credentials_and_default_headers_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/secure"))
        .and(header("Authorization", "Basic dGVzdC10b2tlbjo="))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .header("Accept", "application/json")
        .credentials(Credentials::token("test-token"))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let data: Value = client
        .get_json_with_config(
            &format!("{}/api/secure", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap();

    assert_eq!(data, json!([]));
}

#[tokio::test]
async fn test_client_error_is_upstream_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let err = plain_client()
        .get_json_with_config::<Value>(
            &format!("{}/api/missing", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap_err();

    match err {
        Error::UpstreamFetch { status, url, body } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/api/missing"));
            assert_eq!(body, "Not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = plain_client()
        .get_json_with_config::<Value>(
            &format!("{}/api/flaky", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UpstreamFetch { status: 503, .. }));
}

#[tokio::test]
async fn test_invalid_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/garbled"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let result: crate::error::Result<Value> = plain_client()
        .get_json_with_config(
            &format!("{}/api/garbled", mock_server.uri()),
            RequestConfig::new(),
        )
        .await;

    assert!(matches!(result, Err(Error::JsonParse(_))));
}
