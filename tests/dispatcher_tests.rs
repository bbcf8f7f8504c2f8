//! Integration tests for the shared request dispatcher.
//!
//! Covers request composition (headers, paths, query strings, JSON bodies),
//! error classification, byte and document responses, cancellation and
//! the closed-transport state. A mock server plays both hosts.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};
use tokio_util::sync::CancellationToken;
use trulioo_client::clients::{Namespace, ResourceAddress, DEFAULT_USER_AGENT};
use trulioo_client::{ClientId, ClientSecret, Context, HostUrl, HttpError, TruliooConfig};
use wiremock::matchers::{body_string, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONNECTION: Namespace = Namespace::from_static("connection");
const KYB: Namespace = Namespace::from_static("kyb");

fn config_for(server: &MockServer) -> TruliooConfig {
    TruliooConfig::builder()
        .client_id(ClientId::new("test-client").unwrap())
        .client_secret(ClientSecret::new("test-secret").unwrap())
        .api_host(HostUrl::new(server.uri()).unwrap())
        .auth_host(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

async fn context_with_token(server: &MockServer) -> Context {
    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T",
            "expires_in": 1800
        })))
        .mount(server)
        .await;

    Context::new(config_for(server)).unwrap()
}

// === Request composition ===

#[tokio::test]
async fn test_request_carries_default_headers_and_bearer() {
    let server = MockServer::start().await;
    let context = context_with_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/connection/sayhello/Jane"))
        .and(header("Authorization", "Bearer T"))
        .and(header("Accept", "application/json"))
        .and(header("Accept-Encoding", "gzip"))
        .and(header("User-Agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("Hello Jane"))
        .expect(1)
        .mount(&server)
        .await;

    let body = assert_ok!(
        context
            .get_text(&CONNECTION, &ResourceAddress::new(["sayhello", "Jane"]), None, None)
            .await
    );
    assert_eq!(body, "Hello Jane");
}

#[tokio::test]
async fn test_user_agent_prefix_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T",
            "expires_in": 1800
        })))
        .mount(&server)
        .await;

    let config = TruliooConfig::builder()
        .client_id(ClientId::new("test-client").unwrap())
        .client_secret(ClientSecret::new("test-secret").unwrap())
        .api_host(HostUrl::new(server.uri()).unwrap())
        .auth_host(HostUrl::new(server.uri()).unwrap())
        .user_agent_prefix("Onboarding/2.1")
        .build()
        .unwrap();
    let context = Context::new(config).unwrap();

    let expected = format!("Onboarding/2.1 | {DEFAULT_USER_AGENT}");
    Mock::given(method("GET"))
        .and(path("/connection/testauthentication"))
        .and(header("User-Agent", expected.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(
        context
            .get_text(&CONNECTION, &ResourceAddress::new(["testauthentication"]), None, None)
            .await
    );
}

#[tokio::test]
async fn test_blank_segments_are_skipped() {
    let server = MockServer::start().await;
    let context = context_with_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/kyb/v3/business/countryJOI"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let resource = ResourceAddress::from_optional([Some("v3"), Some("business"), Some("countryJOI"), None]);
    let subdivisions: Vec<serde_json::Value> =
        assert_ok!(context.get(&KYB, &resource, None, None).await);
    assert!(subdivisions.is_empty());
}

#[tokio::test]
async fn test_query_parameters_are_appended() {
    let server = MockServer::start().await;
    let context = context_with_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/kyb/v3/business/report/rec-1"))
        .and(query_param("additionalData", "true"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let query = BTreeMap::from([
        ("additionalData".to_string(), "true".to_string()),
        ("lang".to_string(), "en".to_string()),
    ]);
    let resource = ResourceAddress::new(["v3", "business", "report", "rec-1"]);
    let stream = assert_ok!(context.get_stream(&KYB, &resource, Some(&query), None).await);
    assert_eq!(stream.into_inner(), b"%PDF");
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    let context = context_with_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/connection/echo"))
        .and(header("Content-Type", "application/json; charset=utf-8"))
        .and(body_string(r#"{"Name":"Jane"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Greeting": "Hello Jane"})))
        .expect(1)
        .mount(&server)
        .await;

    let response: serde_json::Value = assert_ok!(
        context
            .post(
                &CONNECTION,
                &ResourceAddress::new(["echo"]),
                Some(&json!({"Name": "Jane"})),
                None
            )
            .await
    );
    assert_eq!(response["Greeting"], "Hello Jane");
}

#[tokio::test]
async fn test_post_without_body_has_no_content_type() {
    let server = MockServer::start().await;
    let context = context_with_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/connection/ping"))
        .and(header_exists("Content-Type"))
        .respond_with(ResponseTemplate::new(415))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/connection/ping"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(
        context
            .post_no_content::<serde_json::Value>(&CONNECTION, &ResourceAddress::new(["ping"]), None, None)
            .await
    );
}

#[tokio::test]
async fn test_put_and_delete_discard_bodies() {
    let server = MockServer::start().await;
    let context = context_with_token(&server).await;

    Mock::given(method("PUT"))
        .and(path("/connection/settings/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ignored"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/connection/settings/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let resource = ResourceAddress::new(["settings", "1"]);
    assert_ok!(context.put(&CONNECTION, &resource, Some(&json!({"On": true})), None).await);
    assert_ok!(context.delete::<serde_json::Value>(&CONNECTION, &resource, None, None).await);
}

// === Error classification ===

#[tokio::test]
async fn test_error_statuses_are_classified() {
    let server = MockServer::start().await;
    let context = context_with_token(&server).await;

    let cases: [(u16, &str); 6] = [
        (400, "bad"),
        (401, "unauthorized"),
        (403, "forbidden"),
        (404, "missing"),
        (500, "boom"),
        (503, "unavailable"),
    ];
    for (status, segment) in cases {
        Mock::given(method("GET"))
            .and(path(format!("/connection/{segment}")))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(json!({"Code": 4000 + i32::from(status), "Message": segment})),
            )
            .mount(&server)
            .await;
    }

    for (status, segment) in cases {
        let error = assert_err!(
            context
                .get_text(&CONNECTION, &ResourceAddress::new([segment]), None, None)
                .await
        );
        let expected_variant = match (&error, status) {
            (HttpError::BadRequest(_), 400)
            | (HttpError::AuthenticationFailure(_), 401)
            | (HttpError::AccessDenied(_), 403)
            | (HttpError::ResourceNotFound(_), 404)
            | (HttpError::InternalServerError(_), 500)
            | (HttpError::Request(_), 503) => true,
            _ => false,
        };
        assert!(expected_variant, "status {status} classified as {error:?}");
        assert_eq!(error.code(), Some(4000 + i32::from(status)));
        assert_eq!(error.message(), segment);
    }
}

#[tokio::test]
async fn test_unstructured_error_body_becomes_message() {
    let server = MockServer::start().await;
    let context = context_with_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/connection/testauthentication"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream timeout"))
        .mount(&server)
        .await;

    let error = assert_err!(
        context
            .get_text(&CONNECTION, &ResourceAddress::new(["testauthentication"]), None, None)
            .await
    );
    match error {
        HttpError::InternalServerError(details) => {
            assert_eq!(details.code, 500);
            assert_eq!(details.message, "upstream timeout");
            assert!(details.reason.is_some());
        }
        other => panic!("Expected InternalServerError, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_undecodable_success_body_is_deserialization_error() {
    let server = MockServer::start().await;
    let context = context_with_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/kyb/v3/configuration/countrycodes/pkg"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\":\"a list\"}"))
        .mount(&server)
        .await;

    let resource = ResourceAddress::new(["v3", "configuration", "countrycodes", "pkg"]);
    let error = assert_err!(context.get::<Vec<String>>(&KYB, &resource, None, None).await);
    match error {
        HttpError::Deserialization {
            status, raw_body, ..
        } => {
            assert_eq!(status, 200);
            assert_eq!(raw_body, "{\"not\":\"a list\"}");
        }
        other => panic!("Expected Deserialization, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_processor_owns_failed_responses() {
    let server = MockServer::start().await;
    let context = context_with_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/connection/document"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&server)
        .await;

    let (status, body) = assert_ok!(
        context
            .get_with(
                &CONNECTION,
                &ResourceAddress::new(["document"]),
                None,
                |response| async move {
                    let status = response.status().as_u16();
                    Ok::<_, HttpError>((status, response.text().await?))
                },
                None,
            )
            .await
    );
    assert_eq!(status, 404);
    assert_eq!(body, "gone");
    assert_eq!(context.open_requests(), 0);
}

// === Byte responses ===

#[tokio::test]
async fn test_stream_is_positioned_at_start() {
    let server = MockServer::start().await;
    let context = context_with_token(&server).await;
    let payload: Vec<u8> = (0..=255).cycle().take(64 * 1024).collect();

    Mock::given(method("GET"))
        .and(path("/connection/blob"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .mount(&server)
        .await;

    let stream = assert_ok!(
        context
            .get_stream(&CONNECTION, &ResourceAddress::new(["blob"]), None, None)
            .await
    );
    assert_eq!(stream.position(), 0);
    assert_eq!(stream.into_inner(), payload);
    assert_eq!(context.open_requests(), 0);
}

#[tokio::test]
async fn test_failed_stream_is_classified() {
    let server = MockServer::start().await;
    let context = context_with_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/connection/blob"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"Code": 403, "Message": "no"})))
        .mount(&server)
        .await;

    let error = assert_err!(
        context
            .get_stream(&CONNECTION, &ResourceAddress::new(["blob"]), None, None)
            .await
    );
    assert!(matches!(error, HttpError::AccessDenied(_)));
    assert_eq!(context.open_requests(), 0);
}

#[tokio::test]
async fn test_stream_survives_oversized_content_length() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0_u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                return;
            }
            request.extend_from_slice(&chunk[..read]);
        }
        let _ = socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 4611686018427387000\r\n\r\nabc")
            .await;
        let _ = socket.shutdown().await;
    });

    let config = TruliooConfig::builder()
        .client_id(ClientId::new("test-client").unwrap())
        .client_secret(ClientSecret::new("test-secret").unwrap())
        .api_host(HostUrl::new(format!("http://{address}")).unwrap())
        .auth_host(HostUrl::new(format!("http://{address}")).unwrap())
        .build()
        .unwrap();
    let context = Context::new(config).unwrap();
    context.credentials().store("T", 1800, Utc::now());

    let error = assert_err!(
        context
            .get_stream(&KYB, &ResourceAddress::new(["x"]), None, None)
            .await
    );
    assert!(matches!(error, HttpError::Network(_)), "got {error:?}");
    assert_eq!(context.open_requests(), 0);
}

// === Cancellation ===

#[tokio::test]
async fn test_cancellation_releases_the_transport() {
    let server = MockServer::start().await;
    let context = context_with_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/connection/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let error = assert_err!(
        context
            .get_text(&CONNECTION, &ResourceAddress::new(["slow"]), None, Some(&cancel))
            .await
    );
    assert!(error.is_cancelled());
    assert_eq!(context.open_requests(), 0);
    assert!(!context.is_closed());
}

#[tokio::test]
async fn test_already_cancelled_token_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let context = Context::new(config_for(&server)).unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();

    let error = assert_err!(
        context
            .get_text(&CONNECTION, &ResourceAddress::new(["testauthentication"]), None, Some(&cancel))
            .await
    );
    assert!(matches!(error, HttpError::Cancelled));
    assert_eq!(context.open_requests(), 0);
}

// === Close ===

#[tokio::test]
async fn test_closed_context_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let context = Context::new(config_for(&server)).unwrap();

    assert!(context.close());
    let error = assert_err!(
        context
            .get_text(&CONNECTION, &ResourceAddress::new(["testauthentication"]), None, None)
            .await
    );
    assert!(matches!(error, HttpError::Closed));
    assert!(!context.close());
}

#[tokio::test]
async fn test_in_flight_request_survives_close() {
    let server = MockServer::start().await;
    let context = std::sync::Arc::new(context_with_token(&server).await);

    Mock::given(method("GET"))
        .and(path("/connection/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("done")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let in_flight = {
        let context = context.clone();
        tokio::spawn(async move {
            context
                .get_text(&CONNECTION, &ResourceAddress::new(["slow"]), None, None)
                .await
        })
    };

    while context.open_requests() == 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(context.close());

    let body = assert_ok!(in_flight.await.unwrap());
    assert_eq!(body, "done");
    assert_eq!(context.open_requests(), 0);
}
