//! Sync orchestrator - the poll cycle driver and marker state machine
//!
//! One poll cycle is a sequential pipeline of typed stages:
//!
//! ```text
//! fetch projects → fan-out file listings → filter by recency
//!     → fan-out version listings → extract editors → build payloads
//!     → dispatch → advance marker
//! ```
//!
//! Within a stage, independent remote reads and deliveries fan out
//! concurrently; across stages, execution is strictly sequential. The
//! orchestrator owns the [`SyncMarker`]: it is written only here, only
//! after the dispatch stage fully succeeds. Any failure leaves the marker
//! untouched so the next periodic trigger retries the same activity
//! window (partial dispatches get re-sent; the receiver's upsert dedupe
//! absorbs them).
//!
//! Overlapping cycles are prevented by an explicit in-flight guard:
//! [`run_if_idle`](SyncOrchestrator::run_if_idle) skips the trigger when
//! a cycle is still running instead of racing it.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;
use tracing::{debug, error, info, warn};

use drawbridge_core::domain::activity::SyncEntry;
use drawbridge_core::domain::marker::SyncMarker;
use drawbridge_core::identity::IdentityResolver;
use drawbridge_core::ports::{IDesignProvider, IEventSink};

use crate::builder::{build_payloads, resolve_editors};
use crate::dispatcher::dispatch_all;
use crate::extractor::active_editors;

// ============================================================================
// Cycle results
// ============================================================================

/// Summary of a completed poll cycle
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// Projects listed for the team
    pub projects: usize,
    /// Files seen across all projects
    pub files_considered: usize,
    /// Files whose `last_modified` fell inside the window
    pub files_active: usize,
    /// Payloads accepted by the webhook
    pub payloads_sent: usize,
    /// Wall-clock duration of the cycle in milliseconds
    pub duration_ms: u64,
}

/// Outcome of a periodic trigger
#[derive(Debug)]
pub enum CycleOutcome {
    /// The cycle ran to completion and the marker advanced
    Completed(CycleReport),
    /// A previous cycle was still in flight; this trigger was dropped
    Skipped,
    /// The cycle failed; the marker is unchanged and the next trigger
    /// retries the same window
    Failed(String),
}

// ============================================================================
// Error classification
// ============================================================================

/// Determines whether an error looks like a transport-level failure
///
/// Used only to pick the log category for a failed cycle (network vs
/// remote API); there is no retry either way.
fn is_network_error(err: &anyhow::Error) -> bool {
    let err_str = format!("{err:#}").to_lowercase();

    err_str.contains("connection")
        || err_str.contains("timeout")
        || err_str.contains("timed out")
        || err_str.contains("reset by peer")
        || err_str.contains("broken pipe")
        || err_str.contains("dns")
}

// ============================================================================
// SyncOrchestrator
// ============================================================================

/// Drives poll cycles and owns the sync marker
pub struct SyncOrchestrator {
    /// Read access to the design service
    provider: Arc<dyn IDesignProvider>,
    /// Outbound webhook delivery
    sink: Arc<dyn IEventSink>,
    /// Static handle → email table
    resolver: IdentityResolver,
    /// Team whose projects are polled
    team_id: String,
    /// The marker; written only on full cycle success
    marker: Mutex<SyncMarker>,
    /// Re-entrancy guard: true while a cycle is running
    in_flight: AtomicBool,
}

impl SyncOrchestrator {
    /// Creates an orchestrator starting from the given marker
    pub fn new(
        provider: Arc<dyn IDesignProvider>,
        sink: Arc<dyn IEventSink>,
        resolver: IdentityResolver,
        team_id: impl Into<String>,
        initial_marker: SyncMarker,
    ) -> Self {
        Self {
            provider,
            sink,
            resolver,
            team_id: team_id.into(),
            marker: Mutex::new(initial_marker),
            in_flight: AtomicBool::new(false),
        }
    }

    /// The current marker value
    pub fn marker(&self) -> SyncMarker {
        *self.marker.lock().unwrap()
    }

    /// Runs one cycle unless a previous one is still in flight
    ///
    /// The periodic trigger calls this; an overlapping trigger is dropped
    /// (skip-if-busy), never queued or raced.
    pub async fn run_if_idle(&self) -> CycleOutcome {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            warn!("Previous sync cycle still in flight, skipping trigger");
            return CycleOutcome::Skipped;
        }

        let outcome = match self.run_cycle(Utc::now()).await {
            Ok(report) => {
                info!(
                    projects = report.projects,
                    files_considered = report.files_considered,
                    files_active = report.files_active,
                    payloads_sent = report.payloads_sent,
                    duration_ms = report.duration_ms,
                    marker = %self.marker(),
                    "Sync cycle completed"
                );
                CycleOutcome::Completed(report)
            }
            Err(err) => {
                let message = format!("{err:#}");
                if is_network_error(&err) {
                    error!(error = %message, category = "network", "Sync cycle failed");
                } else {
                    error!(error = %message, category = "remote_api", "Sync cycle failed");
                }
                CycleOutcome::Failed(message)
            }
        };

        self.in_flight.store(false, Ordering::Release);
        outcome
    }

    /// Runs one full poll cycle starting at `cycle_start`
    ///
    /// `cycle_start` is captured before any network call; on success the
    /// marker advances to `cycle_start - 1 minute` regardless of how long
    /// the cycle took. On failure at any stage the marker is untouched.
    pub async fn run_cycle(&self, cycle_start: DateTime<Utc>) -> Result<CycleReport> {
        let started = Instant::now();
        let marker = self.marker();

        debug!(team_id = %self.team_id, marker = %marker, "Fetching projects");
        let projects = self
            .provider
            .list_projects(&self.team_id)
            .await
            .context("Failed to list projects")?;

        debug!(count = projects.len(), "Fetching file listings");
        let file_batches = try_join_all(
            projects
                .iter()
                .map(|project| self.provider.list_files(&project.id)),
        )
        .await
        .context("Failed to list project files")?;

        let files: Vec<_> = file_batches.into_iter().flatten().collect();
        let files_considered = files.len();

        // Recency filter: only files touched since the marker get their
        // version history fetched.
        let active: Vec<_> = files
            .into_iter()
            .filter(|file| file.last_modified > marker.timestamp())
            .collect();
        let files_active = active.len();

        debug!(
            files_considered,
            files_active, "Fetching version histories for active files"
        );
        let version_lists = try_join_all(
            active
                .iter()
                .map(|file| self.provider.list_versions(&file.key)),
        )
        .await
        .context("Failed to list file versions")?;

        let entries: Vec<SyncEntry> = active
            .into_iter()
            .zip(version_lists)
            .map(|(file, versions)| {
                let users = active_editors(&versions, marker);
                let editors = resolve_editors(&users, &self.resolver);
                debug!(
                    file_key = %file.key,
                    versions = versions.len(),
                    editors = editors.len(),
                    "Extracted editors"
                );
                SyncEntry {
                    file,
                    versions,
                    editors,
                }
            })
            .collect();

        let payloads: Vec<_> = entries.iter().flat_map(build_payloads).collect();

        debug!(count = payloads.len(), "Dispatching payloads");
        dispatch_all(self.sink.as_ref(), &payloads)
            .await
            .context("Dispatch failed")?;

        // All stages succeeded: this is the only place the marker moves.
        {
            let mut current = self.marker.lock().unwrap();
            *current = current.advanced(cycle_start);
        }

        Ok(CycleReport {
            projects: projects.len(),
            files_considered,
            files_active,
            payloads_sent: payloads.len(),
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }
}

// ============================================================================
// Unit tests
// ============================================================================
