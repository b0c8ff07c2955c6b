//! Integration tests for webhook delivery
//!
//! Verifies that WebhookSink POSTs the exact payload schema and treats
//! only HTTP 200 as acceptance.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use wiremock::matchers::{body_json_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use drawbridge_core::domain::activity::{DesignFile, Editor};
use drawbridge_core::domain::payload::ActivityPayload;
use drawbridge_core::ports::IEventSink;
use drawbridge_remote::sink::WebhookSink;

fn sample_payload() -> ActivityPayload {
    let file = DesignFile {
        key: "f1".to_string(),
        name: "Homepage".to_string(),
        last_modified: Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
    };
    let editor = Editor {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
    };
    ActivityPayload::for_editor(&file, &editor)
}

async fn sink_for(server: &MockServer) -> WebhookSink {
    WebhookSink::new(format!("{}/hook", server.uri()), Duration::from_secs(5)).expect("build sink")
}

#[tokio::test]
async fn test_deliver_posts_payload_and_accepts_200() {
    let server = MockServer::start().await;
    let payload = sample_payload();
    let expected_body = serde_json::to_string(&payload).unwrap();

    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_json_string(&expected_body))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let sink = sink_for(&server).await;
    sink.deliver(&payload).await.expect("delivery accepted");
}

#[tokio::test]
async fn test_deliver_rejects_non_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let sink = sink_for(&server).await;
    let result = sink.deliver(&sample_payload()).await;
    assert!(result.is_err());
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("500"), "got: {message}");
}

#[tokio::test]
async fn test_deliver_rejects_other_2xx() {
    // Acceptance is exactly 200, not "any success"
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let sink = sink_for(&server).await;
    assert!(sink.deliver(&sample_payload()).await.is_err());
}

#[tokio::test]
async fn test_deliver_makes_single_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1) // no retry
        .mount(&server)
        .await;

    let sink = sink_for(&server).await;
    assert!(sink.deliver(&sample_payload()).await.is_err());
    // Mock expectations are verified on drop
}
