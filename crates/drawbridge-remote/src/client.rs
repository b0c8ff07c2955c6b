//! Canvas API client
//!
//! Provides a typed HTTP client for the Canvas design service's read-only
//! listing endpoints. Handles the authentication header, per-request
//! timeout, JSON deserialization, and endpoint construction.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use drawbridge_remote::client::CanvasClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = CanvasClient::new("canvas-token", std::time::Duration::from_secs(30))?;
//! let projects = client.list_projects("team-1").await?;
//! println!("{} projects", projects.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use drawbridge_core::config::DEFAULT_BASE_URL;
use drawbridge_core::domain::activity::{DesignFile, Project, Version};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::debug;

/// Header carrying the static API token on every request
const AUTH_HEADER: &str = "X-Canvas-Token";

// ============================================================================
// Canvas API response types
// ============================================================================

/// Response from `GET /teams/{id}/projects`
#[derive(Debug, Deserialize)]
struct ProjectsResponse {
    projects: Vec<Project>,
}

/// Response from `GET /projects/{id}/files`
#[derive(Debug, Deserialize)]
struct FilesResponse {
    files: Vec<DesignFile>,
}

/// Response from `GET /files/{key}/versions`
#[derive(Debug, Deserialize)]
struct VersionsResponse {
    /// Version history, newest first per the API contract
    versions: Vec<Version>,
}

// ============================================================================
// CanvasClient
// ============================================================================

/// HTTP client for Canvas API calls
///
/// Wraps `reqwest::Client` with the auth header, base URL construction,
/// and a fixed per-request timeout. Connection reuse comes from the
/// underlying client's pool; it is an optimization, not a contract.
pub struct CanvasClient {
    /// The underlying HTTP client (carries the request timeout)
    client: Client,
    /// Base URL for API requests
    base_url: String,
    /// Static API access token
    token: String,
}

impl CanvasClient {
    /// Creates a new client against the production Canvas API
    ///
    /// # Arguments
    /// * `token` - Static API access token
    /// * `request_timeout` - Per-request timeout applied to every call
    pub fn new(token: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_BASE_URL, request_timeout)
    }

    /// Creates a new client with a custom base URL (useful for testing)
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates an authenticated GET request builder for the given path
    ///
    /// Automatically prepends the base URL and adds the token header.
    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.get(&url).header(AUTH_HEADER, &self.token)
    }

    /// Lists the projects belonging to a team
    ///
    /// `GET /teams/{team_id}/projects`
    pub async fn list_projects(&self, team_id: &str) -> Result<Vec<Project>> {
        let path = format!("/teams/{team_id}/projects");
        debug!(team_id, "Fetching project listing");

        let response: ProjectsResponse = self
            .get(&path)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {path}"))?
            .error_for_status()
            .with_context(|| format!("GET {path} returned error status"))?
            .json()
            .await
            .with_context(|| format!("Failed to parse {path} response"))?;

        debug!(team_id, count = response.projects.len(), "Fetched projects");
        Ok(response.projects)
    }

    /// Lists the design files in a project
    ///
    /// `GET /projects/{project_id}/files`
    pub async fn list_files(&self, project_id: &str) -> Result<Vec<DesignFile>> {
        let path = format!("/projects/{project_id}/files");
        debug!(project_id, "Fetching file listing");

        let response: FilesResponse = self
            .get(&path)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {path}"))?
            .error_for_status()
            .with_context(|| format!("GET {path} returned error status"))?
            .json()
            .await
            .with_context(|| format!("Failed to parse {path} response"))?;

        debug!(project_id, count = response.files.len(), "Fetched files");
        Ok(response.files)
    }

    /// Lists a file's version history, newest first
    ///
    /// `GET /files/{file_key}/versions`
    pub async fn list_versions(&self, file_key: &str) -> Result<Vec<Version>> {
        let path = format!("/files/{file_key}/versions");
        debug!(file_key, "Fetching version history");

        let response: VersionsResponse = self
            .get(&path)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {path}"))?
            .error_for_status()
            .with_context(|| format!("GET {path} returned error status"))?
            .json()
            .await
            .with_context(|| format!("Failed to parse {path} response"))?;

        debug!(
            file_key,
            count = response.versions.len(),
            "Fetched versions"
        );
        Ok(response.versions)
    }
}
