//! Response classification and connection handling against a mock server.

mod common;

use opencrm::{ApiResponse, ClientConfig, OpenCrmClient, OpenCrmError, Record};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{config, endpoint, with_client};

async fn respond(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint("get_lead")))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn post_get_lead(client: OpenCrmClient) -> Result<ApiResponse, OpenCrmError> {
    let mut data = Record::new();
    data.insert("crmid".to_string(), json!(1));
    client.http().post("get_lead", &data)
}

#[tokio::test]
async fn test_404_is_not_found() {
    let server = respond(404, "no such record").await;

    let err = with_client(config(&server), post_get_lead).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.response_body(), Some("no such record"));
}

#[tokio::test]
async fn test_429_is_rate_limited() {
    let server = respond(429, "slow down").await;

    let err = with_client(config(&server), post_get_lead).await.unwrap_err();

    assert!(err.is_rate_limit());
    assert!(matches!(err, OpenCrmError::RateLimited { status: 429, .. }));
}

#[tokio::test]
async fn test_other_error_status_carries_body() {
    let server = respond(500, "Internal Server Error").await;

    let err = with_client(config(&server), post_get_lead).await.unwrap_err();

    match err {
        OpenCrmError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_400_is_api_error() {
    let server = respond(400, "{\"error\":\"bad field\"}").await;

    let err = with_client(config(&server), post_get_lead).await.unwrap_err();

    assert!(matches!(err, OpenCrmError::Api { status: 400, .. }));
}

#[tokio::test]
async fn test_empty_body_is_empty() {
    let server = respond(200, "").await;

    let response = with_client(config(&server), post_get_lead).await.unwrap();

    assert_eq!(response, ApiResponse::Empty);
}

#[tokio::test]
async fn test_json_body_is_parsed() {
    let server = respond(200, r#"{"crmid":"1","lastname":"Smith"}"#).await;

    let response = with_client(config(&server), post_get_lead).await.unwrap();

    assert_eq!(
        response,
        ApiResponse::Json(json!({"crmid": "1", "lastname": "Smith"}))
    );
}

#[tokio::test]
async fn test_non_json_body_is_text() {
    let server = respond(200, "Record updated").await;

    let response = with_client(config(&server), post_get_lead).await.unwrap();

    assert_eq!(response, ApiResponse::Text("Record updated".to_string()));
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("user-agent", "integration-tests/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("1"))
        .expect(1)
        .mount(&server)
        .await;

    let response = with_client(
        config(&server).with_user_agent("integration-tests/1.0"),
        post_get_lead,
    )
    .await
    .unwrap();

    assert_eq!(response.as_id(), Some(1));
}

#[tokio::test]
async fn test_default_user_agent_names_the_crate() {
    let server = respond(200, "").await;

    with_client(config(&server), post_get_lead).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let agent = requests[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(agent.starts_with("opencrm-rust/"));
}

#[tokio::test]
async fn test_connection_refused_is_connection_error() {
    let config = ClientConfig::new("test", "k", "p").with_base_url("http://127.0.0.1:1");

    let err = with_client(config, post_get_lead).await.unwrap_err();

    assert!(matches!(err, OpenCrmError::Connection(_)));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_close_is_idempotent_and_reopens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("1"))
        .expect(2)
        .mount(&server)
        .await;

    let states = with_client(config(&server), |mut client| {
        let mut states = vec![client.http().is_open()];

        client.http().post("get_lead", &Record::new()).unwrap();
        states.push(client.http().is_open());

        client.close();
        states.push(client.http().is_open());
        client.close();
        states.push(client.http().is_open());

        client.http().post("get_lead", &Record::new()).unwrap();
        states.push(client.http().is_open());
        states
    })
    .await;

    assert_eq!(states, vec![false, true, false, false, true]);
}

#[tokio::test]
async fn test_get_params_go_in_the_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint("get_lead_list_count")))
        .and(wiremock::matchers::query_param("module", "Leads"))
        .respond_with(ResponseTemplate::new(200).set_body_string("3"))
        .expect(1)
        .mount(&server)
        .await;

    let response = with_client(config(&server), |client| {
        client
            .http()
            .get("get_lead_list_count", Some(&[("module", "Leads")]))
    })
    .await
    .unwrap();

    assert_eq!(response.as_id(), Some(3));
}

#[tokio::test]
async fn test_request_without_fields_is_still_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint("get_lead_list_count")))
        .respond_with(ResponseTemplate::new(200).set_body_string("2"))
        .expect(1)
        .mount(&server)
        .await;

    let count = with_client(
        config(&server).with_auth_method(opencrm::AuthMethod::Headers),
        |client| client.leads().count(&opencrm::ListParams::new()),
    )
    .await
    .unwrap();
    assert_eq!(count, 2);

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"), "{}", content_type);
}
