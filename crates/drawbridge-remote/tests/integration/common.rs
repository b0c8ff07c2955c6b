//! Shared test helpers for Canvas API integration tests
//!
//! Provides wiremock-based mock server setup for the Canvas listing
//! endpoints. Each helper mounts the necessary mock endpoints and returns
//! a configured CanvasClient pointing at the mock server.

use std::time::Duration;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use drawbridge_remote::client::CanvasClient;

/// Token used by every test client
pub const TEST_TOKEN: &str = "test-canvas-token";

/// Starts a mock server and returns a (MockServer, CanvasClient) pair.
///
/// No endpoints are mounted; tests mount exactly what they need.
pub async fn setup_canvas_mock() -> (MockServer, CanvasClient) {
    let server = MockServer::start().await;
    let client = CanvasClient::with_base_url(TEST_TOKEN, server.uri(), Duration::from_secs(5))
        .expect("build client");
    (server, client)
}

/// Mounts `GET /teams/{team_id}/projects`, requiring the auth header.
pub async fn mount_projects(server: &MockServer, team_id: &str, projects: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/teams/{team_id}/projects")))
        .and(header("X-Canvas-Token", TEST_TOKEN))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "projects": projects })),
        )
        .mount(server)
        .await;
}

/// Mounts `GET /projects/{project_id}/files`.
pub async fn mount_files(server: &MockServer, project_id: &str, files: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/projects/{project_id}/files")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "files": files })),
        )
        .mount(server)
        .await;
}

/// Mounts `GET /files/{file_key}/versions`.
pub async fn mount_versions(server: &MockServer, file_key: &str, versions: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/files/{file_key}/versions")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "versions": versions })),
        )
        .mount(server)
        .await;
}
