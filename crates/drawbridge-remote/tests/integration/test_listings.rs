//! Integration tests for the Canvas listing endpoints
//!
//! Verifies that CanvasClient fetches and parses project, file and version
//! listings, sends the auth header, and surfaces API errors, and that the
//! rate-limited provider adapter delegates correctly.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use drawbridge_core::ports::IDesignProvider;
use drawbridge_remote::client::CanvasClient;
use drawbridge_remote::provider::CanvasDesignProvider;
use drawbridge_remote::rate_limit::RequestGate;

use crate::common;

#[tokio::test]
async fn test_list_projects_parses_response() {
    let (server, client) = common::setup_canvas_mock().await;
    common::mount_projects(
        &server,
        "team-1",
        serde_json::json!([
            {"id": "p1", "name": "Website"},
            {"id": "p2", "name": "Mobile App"}
        ]),
    )
    .await;

    let projects = client.list_projects("team-1").await.expect("list_projects");

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].id, "p1");
    assert_eq!(projects[0].name, "Website");
    assert_eq!(projects[1].id, "p2");
}

#[tokio::test]
async fn test_list_projects_requires_auth_header() {
    // The mock only matches when the X-Canvas-Token header is present;
    // a client built with the right token therefore succeeds, and the
    // mock server returns 404 for anything else.
    let (server, client) = common::setup_canvas_mock().await;
    common::mount_projects(&server, "team-1", serde_json::json!([])).await;

    let projects = client.list_projects("team-1").await.expect("list_projects");
    assert!(projects.is_empty());

    let wrong =
        CanvasClient::with_base_url("wrong-token", server.uri(), Duration::from_secs(5)).unwrap();
    assert!(wrong.list_projects("team-1").await.is_err());
}

#[tokio::test]
async fn test_list_files_parses_timestamps() {
    let (server, client) = common::setup_canvas_mock().await;
    common::mount_files(
        &server,
        "p1",
        serde_json::json!([
            {"key": "f1", "name": "Homepage", "last_modified": "2026-02-01T12:00:00Z"}
        ]),
    )
    .await;

    let files = client.list_files("p1").await.expect("list_files");

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].key, "f1");
    assert_eq!(
        files[0].last_modified,
        Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn test_list_versions_preserves_order() {
    let (server, client) = common::setup_canvas_mock().await;
    common::mount_versions(
        &server,
        "f1",
        serde_json::json!([
            {"id": "v3", "created_at": "2026-02-01T12:00:00Z",
             "user": {"id": "u1", "handle": "Alice"}},
            {"id": "v2", "created_at": "2026-02-01T11:00:00Z",
             "user": {"id": "u2", "handle": "Bob"}},
            {"id": "v1", "created_at": "2026-02-01T10:00:00Z",
             "user": {"id": "u1", "handle": "alice"}}
        ]),
    )
    .await;

    let versions = client.list_versions("f1").await.expect("list_versions");

    assert_eq!(versions.len(), 3);
    // Newest first, spelling preserved per version
    assert_eq!(versions[0].id, "v3");
    assert_eq!(versions[0].user.handle, "Alice");
    assert_eq!(versions[2].user.handle, "alice");
}

#[tokio::test]
async fn test_non_2xx_status_is_an_error() {
    let (server, client) = common::setup_canvas_mock().await;
    Mock::given(method("GET"))
        .and(path("/teams/team-1/projects"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.list_projects("team-1").await;
    assert!(result.is_err());
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("error status"), "got: {message}");
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let (server, client) = common::setup_canvas_mock().await;
    Mock::given(method("GET"))
        .and(path("/files/f1/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_versions("f1").await;
    assert!(result.is_err());
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("parse"), "got: {message}");
}

#[tokio::test]
async fn test_request_timeout_surfaces_as_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/teams/team-1/projects"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client =
        CanvasClient::with_base_url("tok", server.uri(), Duration::from_millis(100)).unwrap();
    let result = client.list_projects("team-1").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_provider_delegates_through_gate() {
    let (server, _client) = common::setup_canvas_mock().await;
    common::mount_projects(&server, "team-1", serde_json::json!([{"id": "p1", "name": "A"}]))
        .await;
    common::mount_files(
        &server,
        "p1",
        serde_json::json!([
            {"key": "f1", "name": "F", "last_modified": "2026-02-01T12:00:00Z"}
        ]),
    )
    .await;
    common::mount_versions(&server, "f1", serde_json::json!([])).await;

    let client =
        CanvasClient::with_base_url(common::TEST_TOKEN, server.uri(), Duration::from_secs(5))
            .unwrap();
    let gate = Arc::new(RequestGate::new(10));
    let provider = CanvasDesignProvider::new(client, Arc::clone(&gate));

    let projects = provider.list_projects("team-1").await.expect("projects");
    let files = provider.list_files(&projects[0].id).await.expect("files");
    let versions = provider.list_versions(&files[0].key).await.expect("versions");

    assert_eq!(projects.len(), 1);
    assert_eq!(files.len(), 1);
    assert!(versions.is_empty());
    // Three requests drained three tokens from the shared gate
    assert!(gate.available_tokens() <= 7.1);
}
