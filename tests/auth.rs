//! Credential strategies as seen by the server.

mod common;

use opencrm::{AuthMethod, ListParams, OpenCrmClient, OpenCrmError};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{config, endpoint, form_field, form_fields, with_client, API_KEY, PASS_KEY};

async fn mount_count(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(endpoint("get_lead_list_count")))
        .respond_with(ResponseTemplate::new(200).set_body_string("5"))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_login(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(endpoint("login")))
        .and(form_field("key", API_KEY))
        .and(form_field("passkey", PASS_KEY))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

/// Builds a session client off the async runtime; login happens during construction.
async fn session_client(server: &MockServer) -> Result<(), OpenCrmError> {
    let config = config(server).with_auth_method(AuthMethod::Session);
    tokio::task::spawn_blocking(move || OpenCrmClient::new(config).map(drop))
        .await
        .expect("blocking task panicked")
}

#[tokio::test]
async fn test_body_keys_are_sent_as_form_fields() {
    let server = MockServer::start().await;
    mount_count(&server).await;

    let count = with_client(config(&server), |client| {
        client.leads().count(&ListParams::new())
    })
    .await
    .unwrap();
    assert_eq!(count, 5);

    let requests = server.received_requests().await.unwrap();
    let sent = form_fields(&requests[0]);
    assert_eq!(sent.get("apikey").map(String::as_str), Some(API_KEY));
    assert_eq!(sent.get("passkey").map(String::as_str), Some(PASS_KEY));
    assert!(requests[0].headers.get("key1").is_none());
}

#[tokio::test]
async fn test_header_keys_are_sent_as_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint("get_lead_list_count")))
        .and(header("KEY1", API_KEY))
        .and(header("KEY2", PASS_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_string("5"))
        .expect(1)
        .mount(&server)
        .await;

    let count = with_client(
        config(&server).with_auth_method(AuthMethod::Headers),
        |client| client.leads().count(&ListParams::new()),
    )
    .await
    .unwrap();
    assert_eq!(count, 5);

    let sent = form_fields(&server.received_requests().await.unwrap()[0]);
    assert!(!sent.contains_key("apikey"));
    assert!(!sent.contains_key("passkey"));
}

#[tokio::test]
async fn test_session_login_with_json_key() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"accesskey": "sess-123"})),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(endpoint("get_lead_list_count")))
        .and(form_field("accesskey", "sess-123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("5"))
        .expect(1)
        .mount(&server)
        .await;

    let count = with_client(
        config(&server).with_auth_method(AuthMethod::Session),
        |client| client.leads().count(&ListParams::new()),
    )
    .await
    .unwrap();
    assert_eq!(count, 5);

    let requests = server.received_requests().await.unwrap();
    let sent = form_fields(&requests[1]);
    assert!(!sent.contains_key("apikey"));
    assert!(!sent.contains_key("passkey"));
}

#[tokio::test]
async fn test_session_login_with_raw_text_key() {
    let server = MockServer::start().await;
    mount_login(&server, ResponseTemplate::new(200).set_body_string("  raw-key\n")).await;
    Mock::given(method("POST"))
        .and(path(endpoint("get_lead_list_count")))
        .and(form_field("accesskey", "raw-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("5"))
        .expect(1)
        .mount(&server)
        .await;

    let count = with_client(
        config(&server).with_auth_method(AuthMethod::Session),
        |client| client.leads().count(&ListParams::new()),
    )
    .await
    .unwrap();

    assert_eq!(count, 5);
}

#[tokio::test]
async fn test_session_login_with_blank_key_fails() {
    let server = MockServer::start().await;
    mount_login(&server, ResponseTemplate::new(200).set_body_string(" \n")).await;

    let err = session_client(&server).await.unwrap_err();

    match err {
        OpenCrmError::Authentication { response, .. } => {
            assert_eq!(response.as_deref(), Some(" \n"));
        }
        other => panic!("expected Authentication error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_session_login_with_empty_body_fails() {
    let server = MockServer::start().await;
    mount_login(&server, ResponseTemplate::new(200)).await;

    let err = session_client(&server).await.unwrap_err();

    assert!(matches!(err, OpenCrmError::Authentication { .. }));
}

#[tokio::test]
async fn test_session_login_rejected() {
    let server = MockServer::start().await;
    mount_login(&server, ResponseTemplate::new(401).set_body_string("Invalid key")).await;

    let err = session_client(&server).await.unwrap_err();

    assert!(err.to_string().contains("401"));
    assert_eq!(err.response_body(), Some("Invalid key"));
    assert!(matches!(err, OpenCrmError::Authentication { .. }));
}

#[tokio::test]
async fn test_session_login_unreachable() {
    let config = opencrm::ClientConfig::new("test", API_KEY, PASS_KEY)
        .with_base_url("http://127.0.0.1:1")
        .with_auth_method(AuthMethod::Session);

    let err = tokio::task::spawn_blocking(move || OpenCrmClient::new(config).map(drop))
        .await
        .unwrap()
        .unwrap_err();

    match err {
        OpenCrmError::Authentication {
            response, source, ..
        } => {
            assert!(response.is_none());
            assert!(source.is_some());
        }
        other => panic!("expected Authentication error, got {:?}", other),
    }
}
