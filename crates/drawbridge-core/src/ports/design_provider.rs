//! Design provider port (driven/secondary port)
//!
//! Read-only interface to the design collaboration service. The primary
//! implementation targets the Canvas REST API, but the trait is
//! provider-agnostic so tests can substitute in-memory fakes.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific and don't need domain-level classification.
//! - Uses `#[async_trait]` for async trait methods.
//! - Implementations are expected to apply the process-wide request
//!   throttle and per-request timeout; callers only see the results.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::activity::{DesignFile, Project, Version};

/// Read access to the design service's listing endpoints
///
/// All three listings are fetched fresh each poll cycle; nothing is cached
/// across cycles. Version lists are returned newest-first, matching the
/// remote API's ordering contract.
#[async_trait]
pub trait IDesignProvider: Send + Sync {
    /// Lists the projects belonging to a team
    async fn list_projects(&self, team_id: &str) -> Result<Vec<Project>>;

    /// Lists the design files in a project
    async fn list_files(&self, project_id: &str) -> Result<Vec<DesignFile>>;

    /// Lists a file's version history, newest first
    async fn list_versions(&self, file_key: &str) -> Result<Vec<Version>>;
}
