//! Drawbridge Daemon - Background design activity sync service
//!
//! This binary runs as a long-lived service and handles:
//! - Periodic polling of the Canvas design service
//! - Editor extraction and identity resolution
//! - Webhook delivery of activity payloads
//! - Graceful shutdown on SIGTERM/SIGINT
//!
//! # Architecture
//!
//! The daemon loads and validates the configuration, wires the Canvas
//! adapters into a [`SyncOrchestrator`], then enters a main loop that
//! runs one sync cycle per poll interval (the first immediately at
//! startup). The loop is controlled by a `CancellationToken` that is
//! triggered on receipt of SIGTERM or SIGINT. A failed cycle is logged
//! and the loop keeps running; the next tick retries the same window.

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use chrono::Utc;
use drawbridge_core::{
    config::Config, domain::marker::SyncMarker, identity::IdentityResolver, ports::IEventSink,
};
use drawbridge_remote::{CanvasClient, CanvasDesignProvider, RequestGate, WebhookSink};
use drawbridge_sync::{CycleOutcome, SyncOrchestrator};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configuration file path
const CONFIG_ENV: &str = "DRAWBRIDGE_CONFIG";

// ============================================================================
// DaemonService struct
// ============================================================================

/// Main daemon service that owns the orchestrator and the poll loop
struct DaemonService {
    /// Application configuration loaded from YAML
    config: Config,
    /// The cycle driver; owns the sync marker
    orchestrator: Arc<SyncOrchestrator>,
    /// Token for signalling graceful shutdown
    shutdown: CancellationToken,
}

impl DaemonService {
    /// Creates a new DaemonService from a validated configuration
    ///
    /// Wires the rate-limited Canvas provider, the webhook sink and the
    /// identity resolver into the orchestrator. The initial marker covers
    /// the configured history window back from now.
    fn new(config: Config, shutdown: CancellationToken) -> Result<Self> {
        let request_timeout = Duration::from_secs(config.remote.request_timeout_secs);

        let gate = Arc::new(RequestGate::new(config.remote.requests_per_second));
        let client = CanvasClient::with_base_url(
            &config.remote.token,
            &config.remote.base_url,
            request_timeout,
        )
        .context("Failed to build Canvas client")?;
        let provider = Arc::new(CanvasDesignProvider::new(client, gate));

        let sink = WebhookSink::new(&config.webhook.url, request_timeout)
            .context("Failed to build webhook sink")?;

        let resolver = IdentityResolver::new(&config.identities);
        if resolver.is_empty() {
            warn!("Identity table is empty; no editor will resolve to an email");
        }

        let marker = SyncMarker::initial(Utc::now(), config.sync.history_window_minutes);
        info!(
            marker = %marker,
            window_minutes = config.sync.history_window_minutes,
            "Initial sync marker set"
        );

        let orchestrator = Arc::new(SyncOrchestrator::new(
            provider,
            Arc::new(sink) as Arc<dyn IEventSink>,
            resolver,
            config.remote.team_id.clone(),
            marker,
        ));

        Ok(Self {
            config,
            orchestrator,
            shutdown,
        })
    }

    // ========================================================================
    // Periodic polling loop
    // ========================================================================

    /// Runs the poll loop until shutdown is signalled
    ///
    /// Uses `tokio::time::interval` based on `config.sync.poll_interval_minutes`.
    /// The first cycle runs immediately at startup. Cycle failures are
    /// logged inside the orchestrator and never terminate the loop.
    async fn run(&self) -> Result<()> {
        let poll_minutes = self.config.sync.poll_interval_minutes;
        let poll_duration = Duration::from_secs(poll_minutes * 60);

        info!(
            poll_interval_minutes = poll_minutes,
            team_id = %self.config.remote.team_id,
            "Starting sync loop"
        );

        let mut interval = tokio::time::interval(poll_duration);
        // The first tick fires immediately; we want to sync right away
        interval.tick().await;

        loop {
            match self.orchestrator.run_if_idle().await {
                CycleOutcome::Completed(_) => {}
                CycleOutcome::Skipped => {
                    warn!("Cycle skipped: previous cycle still running");
                }
                CycleOutcome::Failed(_) => {
                    // Already logged with its category; the next tick
                    // retries the same window because the marker did not
                    // move.
                }
            }

            tokio::select! {
                _ = interval.tick() => {}
                _ = self.shutdown.cancelled() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        info!("Sync loop terminated");
        Ok(())
    }
}

// ============================================================================
// Configuration loading
// ============================================================================

/// Resolves the configuration file path (env override, then default)
fn config_path() -> PathBuf {
    std::env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| Config::default_path())
}

/// Loads and validates the configuration, or fails with every error found
fn load_config(path: &std::path::Path) -> Result<Config> {
    let config = Config::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    let errors = config.validate();
    if !errors.is_empty() {
        for err in &errors {
            error!(field = %err.field, message = %err.message, "Invalid configuration");
        }
        anyhow::bail!(
            "Configuration at {} has {} error(s)",
            path.display(),
            errors.len()
        );
    }

    Ok(config)
}

// ============================================================================
// Graceful shutdown signal handler
// ============================================================================

/// Waits for SIGTERM or SIGINT and triggers the cancellation token
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C)");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }

    token.cancel();
}

// ============================================================================
// Main entry point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let path = config_path();
    let config = Config::load_or_default(&path);

    // RUST_LOG wins over the configured level
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();

    info!("Drawbridge daemon starting (drawbridged)");
    info!(config_path = %path.display(), "Loading configuration");

    // Reload with strict semantics now that logging is up: a missing or
    // invalid file is fatal.
    let config = load_config(&path)?;

    let shutdown_token = CancellationToken::new();

    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        shutdown_signal(signal_token).await;
    });

    let service = DaemonService::new(config, shutdown_token.clone())?;

    let result = service.run().await;

    match &result {
        Ok(()) => info!("Drawbridge daemon shut down gracefully"),
        Err(e) => error!(error = %e, "Drawbridge daemon exiting with error"),
    }

    result
}

// ============================================================================
// Tests
// ============================================================================
