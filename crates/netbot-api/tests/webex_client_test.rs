#![allow(clippy::unwrap_used)]
// Integration tests for `WebexClient` using wiremock.

use std::io::Write;

use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netbot_api::{Error, TransportConfig, WebexClient};

// ── Helpers ─────────────────────────────────────────────────────────

const ROOM: &str = "Y2lzY29zcGFyazovL3VzL1JPT00vMTIz";

async fn setup() -> (MockServer, WebexClient) {
    let server = MockServer::start().await;
    let token: secrecy::SecretString = "test-token".to_string().into();
    let base = format!("{}/v1", server.uri());
    let client = WebexClient::new(&base, &token, &TransportConfig::default()).unwrap();
    (server, client)
}

// ── Inbox ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_latest_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/messages"))
        .and(query_param("roomId", ROOM))
        .and(query_param("max", "1"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "m1",
                "roomId": ROOM,
                "text": "/66070101 restconf",
                "personEmail": "student@example.com",
                "created": "2026-10-18T09:00:00.000Z"
            }]
        })))
        .mount(&server)
        .await;

    let message = client.latest_message(ROOM).await.unwrap().unwrap();
    assert_eq!(message.text, "/66070101 restconf");
    assert_eq!(message.person_email.as_deref(), Some("student@example.com"));
    assert!(message.created.is_some());
}

#[tokio::test]
async fn test_latest_message_empty_room() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    assert!(client.latest_message(ROOM).await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_only_message_has_empty_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "m2", "roomId": ROOM, "files": ["https://example.com/f"] }]
        })))
        .mount(&server)
        .await;

    let message = client.latest_message(ROOM).await.unwrap().unwrap();
    assert!(message.text.is_empty());
}

#[tokio::test]
async fn test_latest_message_rejected_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.latest_message(ROOM).await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_latest_message_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let result = client.latest_message(ROOM).await;
    assert!(
        matches!(result, Err(Error::Chat { status: 503, .. })),
        "expected Chat error, got: {result:?}"
    );
}

// ── Outbox ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_post_markdown() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_partial_json(json!({
            "roomId": ROOM,
            "markdown": "Ok: Restconf"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "m3" })))
        .expect(1)
        .mount(&server)
        .await;

    client.post_markdown(ROOM, "Ok: Restconf").await.unwrap();
}

#[tokio::test]
async fn test_post_file_is_multipart() {
    let (server, client) = setup().await;

    let mut file = tempfile::Builder::new()
        .prefix("show_run_66070101_10.0.15.61")
        .suffix(".txt")
        .tempfile()
        .unwrap();
    writeln!(file, "hostname R1-Exam").unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_string_contains("name=\"roomId\""))
        .and(body_string_contains("show running config"))
        .and(body_string_contains("hostname R1-Exam"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "m4" })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .post_file(ROOM, "show running config", file.path())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_post_file_missing_path() {
    let (_server, client) = setup().await;

    let result = client
        .post_file(ROOM, "show running config", std::path::Path::new("/nonexistent/show_run.txt"))
        .await;
    assert!(
        matches!(result, Err(Error::Io(_))),
        "expected Io error, got: {result:?}"
    );
}
