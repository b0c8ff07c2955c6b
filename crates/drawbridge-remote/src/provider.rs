//! Design provider adapter
//!
//! Implements the [`IDesignProvider`] port on top of [`CanvasClient`],
//! applying the process-wide [`RequestGate`] before every request. The
//! gate is shared: concurrent fan-out batches from the orchestrator all
//! drain the same bucket, so the configured requests-per-second budget
//! holds globally, not per batch.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use drawbridge_core::domain::activity::{DesignFile, Project, Version};
use drawbridge_core::ports::IDesignProvider;

use crate::client::CanvasClient;
use crate::rate_limit::RequestGate;

/// Rate-limited [`IDesignProvider`] backed by the Canvas REST API
pub struct CanvasDesignProvider {
    client: CanvasClient,
    gate: Arc<RequestGate>,
}

impl CanvasDesignProvider {
    /// Creates a provider sharing the given request gate
    pub fn new(client: CanvasClient, gate: Arc<RequestGate>) -> Self {
        Self { client, gate }
    }
}

#[async_trait]
impl IDesignProvider for CanvasDesignProvider {
    async fn list_projects(&self, team_id: &str) -> Result<Vec<Project>> {
        self.gate.acquire().await;
        self.client.list_projects(team_id).await
    }

    async fn list_files(&self, project_id: &str) -> Result<Vec<DesignFile>> {
        self.gate.acquire().await;
        self.client.list_files(project_id).await
    }

    async fn list_versions(&self, file_key: &str) -> Result<Vec<Version>> {
        self.gate.acquire().await;
        self.client.list_versions(file_key).await
    }
}
