//! Tests for the transport module

use super::types::truncate_body;
use super::*;
use crate::credentials::ApiCredentials;
use crate::error::Error;
use crate::types::BackoffType;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_credentials(server: &MockServer) -> ApiCredentials {
    ApiCredentials::new(format!("{}/graphql", server.uri()), "secret-token").unwrap()
}

fn test_executor(max_retries: u32) -> GraphqlExecutor {
    let config = ExecutorConfig::builder()
        .max_retries(max_retries)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();
    GraphqlExecutor::with_config(config)
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_executor_config_default() {
    let config = ExecutorConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.backoff_type, BackoffType::Exponential);
    assert_eq!(config.token_header, "x-token");
    assert!(config.rate_limit.is_some());
}

#[test]
fn test_executor_config_builder() {
    let config = ExecutorConfig::builder()
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .token_header("x-api-token")
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(config.token_header, "x-api-token");
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_spec_builder() {
    let spec = RequestSpec::new("query { records { id } }")
        .with_variable("search", json!("smith"))
        .with_operation_name("Records")
        .with_retries(2)
        .with_verbose(true);

    assert_eq!(spec.query, "query { records { id } }");
    assert_eq!(spec.variables.get("search"), Some(&json!("smith")));
    assert_eq!(spec.operation(), "Records");
    assert_eq!(spec.max_retries, Some(2));
    assert!(spec.verbose);
}

#[test]
fn test_request_spec_default_operation_label() {
    let spec = RequestSpec::new("query { records { id } }");
    assert_eq!(spec.operation(), "graphql");
    assert_eq!(spec.max_retries, None);
    assert!(!spec.verbose);
}

// ============================================================================
// Execute Tests
// ============================================================================

#[tokio::test]
async fn test_execute_returns_data_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("x-token", "secret-token"))
        .and(body_partial_json(json!({
            "query": "query { records { id } }"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "records": [{"id": "r1"}] }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let executor = test_executor(3);
    let spec = RequestSpec::new("query { records { id } }");
    let data = executor
        .execute(&spec, &test_credentials(&mock_server))
        .await
        .unwrap();

    assert_eq!(data["records"][0]["id"], "r1");
}

#[tokio::test]
async fn test_execute_sends_variables() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": { "pagination": { "page": 1, "pageSize": 50 } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let executor = test_executor(3);
    let spec = RequestSpec::new("query { records { id } }")
        .with_variable("pagination", json!({"page": 1, "pageSize": 50}));
    executor
        .execute(&spec, &test_credentials(&mock_server))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_execute_custom_token_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("x-api-token", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ExecutorConfig::builder()
        .token_header("x-api-token")
        .no_rate_limit()
        .build();
    let executor = GraphqlExecutor::with_config(config);
    let spec = RequestSpec::new("query { ping }");
    executor
        .execute(&spec, &test_credentials(&mock_server))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_execute_empty_payload_is_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let executor = test_executor(3);
    let spec = RequestSpec::new("query { ping }");
    let data = executor
        .execute(&spec, &test_credentials(&mock_server))
        .await
        .unwrap();

    assert!(data.is_null());
}

#[tokio::test]
async fn test_execute_graphql_errors_short_circuit() {
    let mock_server = MockServer::start().await;

    // Error payload in a 2xx response must fail once, with zero retries.
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "Field 'bogus' does not exist" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let executor = test_executor(3);
    let spec = RequestSpec::new("query { bogus }").with_operation_name("Bogus");
    let err = executor
        .execute(&spec, &test_credentials(&mock_server))
        .await
        .unwrap_err();

    match err {
        Error::Graphql {
            operation,
            messages,
        } => {
            assert_eq!(operation, "Bogus");
            assert_eq!(messages, vec!["Field 'bogus' does not exist".to_string()]);
        }
        other => panic!("Expected Graphql error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_execute_retries_transient_then_succeeds() {
    let mock_server = MockServer::start().await;

    // First two calls return 503, third succeeds
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "ok": true }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let executor = test_executor(3);
    let spec = RequestSpec::new("query { ok }");
    let data = executor
        .execute(&spec, &test_credentials(&mock_server))
        .await
        .unwrap();

    assert_eq!(data["ok"], true);
}

#[tokio::test]
async fn test_execute_retries_exhausted() {
    let mock_server = MockServer::start().await;

    // max_retries = 2 means exactly 3 underlying calls
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let executor = test_executor(2);
    let spec = RequestSpec::new("query { ok }").with_operation_name("Ok");
    let err = executor
        .execute(&spec, &test_credentials(&mock_server))
        .await
        .unwrap_err();

    match err {
        Error::RetriesExhausted {
            operation,
            attempts,
            message,
        } => {
            assert_eq!(operation, "Ok");
            assert_eq!(attempts, 3);
            assert!(message.contains("503"));
        }
        other => panic!("Expected RetriesExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_execute_spec_overrides_max_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Executor allows 3 retries, the request allows none.
    let executor = test_executor(3);
    let spec = RequestSpec::new("query { ok }").with_retries(0);
    let err = executor
        .execute(&spec, &test_credentials(&mock_server))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::RetriesExhausted { attempts: 1, .. }
    ));
}

#[tokio::test]
async fn test_execute_client_error_is_terminal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let executor = test_executor(3);
    let spec = RequestSpec::new("query { ok }");
    let err = executor
        .execute(&spec, &test_credentials(&mock_server))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_execute_429_is_terminal() {
    let mock_server = MockServer::start().await;

    // Throttling is the rate limiter's job; a 429 that gets through is
    // a client-class failure and is not retried.
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let executor = test_executor(3);
    let spec = RequestSpec::new("query { ok }");
    let err = executor
        .execute(&spec, &test_credentials(&mock_server))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 429, .. }));
}

// ============================================================================
// Backoff Tests
// ============================================================================

#[test]
fn test_calculate_backoff_constant() {
    let config = ExecutorConfig::builder()
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .no_rate_limit()
        .build();

    let executor = GraphqlExecutor::with_config(config);

    assert_eq!(executor.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(executor.calculate_backoff(1), Duration::from_millis(100));
    assert_eq!(executor.calculate_backoff(5), Duration::from_millis(100));
}

#[test]
fn test_calculate_backoff_linear() {
    let config = ExecutorConfig::builder()
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .no_rate_limit()
        .build();

    let executor = GraphqlExecutor::with_config(config);

    assert_eq!(executor.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(executor.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(executor.calculate_backoff(2), Duration::from_millis(300));
}

#[test]
fn test_calculate_backoff_exponential() {
    let config = ExecutorConfig::builder()
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .no_rate_limit()
        .build();

    let executor = GraphqlExecutor::with_config(config);

    assert_eq!(executor.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(executor.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(executor.calculate_backoff(2), Duration::from_millis(400));
    assert_eq!(executor.calculate_backoff(3), Duration::from_millis(800));
}

#[test]
fn test_calculate_backoff_respects_max() {
    let config = ExecutorConfig::builder()
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_millis(500), // Low max
        )
        .no_rate_limit()
        .build();

    let executor = GraphqlExecutor::with_config(config);

    assert_eq!(executor.calculate_backoff(10), Duration::from_millis(500));
}

// ============================================================================
// Misc
// ============================================================================

#[test]
fn test_truncate_body_short() {
    let body = truncate_body("short body".to_string());
    assert_eq!(body, "short body");
}

#[test]
fn test_truncate_body_long() {
    let body = truncate_body("x".repeat(10_000));
    assert_eq!(body.chars().count(), 4097);
    assert!(body.ends_with('…'));
}

#[test]
fn test_executor_debug() {
    let executor = GraphqlExecutor::new();
    let debug_str = format!("{executor:?}");
    assert!(debug_str.contains("GraphqlExecutor"));
    assert!(debug_str.contains("config"));
}

#[test]
fn test_executor_default_has_rate_limiter() {
    let executor = GraphqlExecutor::default();
    assert!(executor.has_rate_limiter());
}
