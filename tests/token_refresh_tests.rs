//! Integration tests for the client-credentials token lifecycle.
//!
//! These tests run against a local mock server standing in for both the
//! authentication host and the API host, and cover:
//! - The token exchange request and the stored result
//! - Soft failure on malformed token bodies
//! - Classified errors on rejected exchanges
//! - Lazy renewal: no refresh while the token is valid, one per call once
//!   it is inside the refresh buffer

use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use tokio_util::sync::CancellationToken;
use trulioo_client::{ClientId, ClientSecret, HostUrl, HttpError, TruliooClient, TruliooConfig};
use wiremock::matchers::{any, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

fn config_for(server: &MockServer, refresh_buffer: Duration) -> TruliooConfig {
    TruliooConfig::builder()
        .client_id(ClientId::new("test-client").unwrap())
        .client_secret(ClientSecret::new("test-secret").unwrap())
        .api_host(HostUrl::new(server.uri()).unwrap())
        .auth_host(HostUrl::new(server.uri()).unwrap())
        .refresh_buffer(refresh_buffer)
        .build()
        .unwrap()
}

fn client_for(server: &MockServer) -> TruliooClient {
    TruliooClient::new(config_for(server, Duration::from_millis(100))).unwrap()
}

async fn mount_token(
    server: &MockServer,
    access_token: &str,
    expires_in: i64,
    times: impl Into<Times>,
) {
    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": access_token,
            "expires_in": expires_in,
            "token_type": "Bearer",
            "scope": "napi.api"
        })))
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_authenticated(server: &MockServer, access_token: &str) {
    Mock::given(method("GET"))
        .and(path("/connection/testauthentication"))
        .and(header("Authorization", format!("Bearer {access_token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("test-client"))
        .mount(server)
        .await;
}

// === Token exchange ===

#[tokio::test]
async fn test_refresh_posts_client_credentials_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=test-client"))
        .and(body_string_contains("client_secret=test-secret"))
        .and(body_string_contains("scope=napi.api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T",
            "expires_in": 1800,
            "token_type": "Bearer",
            "scope": "napi.api"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let before = Utc::now();
    let refreshed = assert_ok!(client.context().refresh_token(None).await);
    let after = Utc::now();

    assert!(refreshed);
    let token = client.context().credentials().bearer_token();
    assert_eq!(token.value(), "T");
    assert!(token.expires_at() >= before + chrono::Duration::seconds(1800));
    assert!(token.expires_at() <= after + chrono::Duration::seconds(1800));
}

#[tokio::test]
async fn test_malformed_token_body_returns_false() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let refreshed = assert_ok!(client.context().refresh_token(None).await);

    assert!(!refreshed);
    assert!(client.context().credentials().bearer_token().is_empty());
}

#[tokio::test]
async fn test_null_token_body_returns_false() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(!assert_ok!(client.context().refresh_token(None).await));
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "first",
            "expires_in": 1800
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"expires_in": 60})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(assert_ok!(client.context().refresh_token(None).await));
    assert!(!assert_ok!(client.context().refresh_token(None).await));
    assert_eq!(client.context().credentials().bearer_token().value(), "first");
}

#[tokio::test]
async fn test_rejected_exchange_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"Code": 1001, "Message": "bad creds"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = assert_err!(client.context().refresh_token(None).await);

    match error {
        HttpError::AuthenticationFailure(details) => {
            assert_eq!(details.code, 1001);
            assert_eq!(details.message, "bad creds");
        }
        other => panic!("Expected AuthenticationFailure, got: {other:?}"),
    }
    assert!(client.context().credentials().bearer_token().is_empty());
}

#[tokio::test]
async fn test_rejected_exchange_aborts_the_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_client"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/connection/testauthentication"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = assert_err!(client.connection().test_authentication(None).await);

    assert!(matches!(error, HttpError::BadRequest(_)));
    assert_eq!(error.code(), Some(400));
}

// === Lazy renewal ===

#[tokio::test]
async fn test_first_call_fetches_a_token() {
    let server = MockServer::start().await;
    mount_token(&server, "T", 1800, 1).await;
    mount_authenticated(&server, "T").await;

    let client = client_for(&server);
    let body = assert_ok!(client.connection().test_authentication(None).await);

    assert_eq!(body, "test-client");
}

#[tokio::test]
async fn test_valid_token_is_not_refreshed() {
    let server = MockServer::start().await;
    mount_token(&server, "T", 1800, 1).await;
    mount_authenticated(&server, "T").await;

    let client = client_for(&server);
    assert_ok!(client.connection().test_authentication(None).await);
    assert_ok!(client.connection().test_authentication(None).await);
    assert_ok!(client.connection().test_authentication(None).await);

    server.verify().await;
}

#[tokio::test]
async fn test_token_inside_buffer_is_refreshed_once_per_call() {
    let server = MockServer::start().await;
    // Lifetime shorter than the buffer: every call sees an expiring token.
    mount_token(&server, "T", 5, 2).await;
    mount_authenticated(&server, "T").await;

    let client = TruliooClient::new(config_for(&server, Duration::from_secs(60))).unwrap();
    assert_ok!(client.connection().test_authentication(None).await);
    assert_ok!(client.connection().test_authentication(None).await);

    server.verify().await;
}

#[tokio::test]
async fn test_manually_stored_valid_token_skips_exchange() {
    let server = MockServer::start().await;
    mount_token(&server, "unused", 1800, 0).await;
    mount_authenticated(&server, "preloaded").await;

    let client = client_for(&server);
    client
        .context()
        .credentials()
        .store("preloaded", 600, Utc::now());

    assert_ok!(client.connection().test_authentication(None).await);
    server.verify().await;
}

#[tokio::test]
async fn test_concurrent_calls_share_the_token() {
    let server = MockServer::start().await;
    mount_token(&server, "T", 1800, 1..=8).await;
    mount_authenticated(&server, "T").await;

    let client = client_for(&server);
    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.connection().test_authentication(None).await
        }));
    }

    for handle in handles {
        assert_ok!(handle.await.unwrap());
    }
    assert_eq!(client.context().credentials().bearer_token().value(), "T");
    assert_eq!(client.context().open_requests(), 0);
}

#[tokio::test]
async fn test_cancellation_during_token_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "T", "expires_in": 1800}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/connection/testauthentication"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let error = assert_err!(client.connection().test_authentication(Some(&cancel)).await);

    assert!(matches!(error, HttpError::Cancelled));
    assert_eq!(client.context().open_requests(), 0);
    assert!(client.context().credentials().bearer_token().is_empty());
    server.verify().await;
}

#[tokio::test]
async fn test_cancelled_manual_refresh_stores_nothing() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "T", "expires_in": 1800}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let error = assert_err!(client.context().refresh_token(Some(&cancel)).await);

    assert!(error.is_cancelled());
    assert_eq!(client.context().open_requests(), 0);
    assert!(client.context().credentials().bearer_token().is_empty());
}
