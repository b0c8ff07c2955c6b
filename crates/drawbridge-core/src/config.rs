//! Configuration module for Drawbridge.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for Drawbridge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub remote: RemoteConfig,
    pub webhook: WebhookConfig,
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
    /// Static display handle → email address table.
    #[serde(default)]
    pub identities: HashMap<String, String>,
}

/// Design service access settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Static API access token, sent on every request.
    pub token: String,
    /// Team whose projects are polled.
    pub team_id: String,
    /// API base URL. Overridable for tests.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Outbound read throttle, applied uniformly across all endpoints.
    pub requests_per_second: u32,
}

/// Webhook delivery settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Delivery endpoint; one POST per payload.
    pub url: String,
}

/// Polling and window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// How far back the first cycle looks for activity, in minutes.
    pub history_window_minutes: u64,
    /// Minutes between poll cycles.
    pub poll_interval_minutes: u64,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default Canvas API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.canvas.design/v1";

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            team_id: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            requests_per_second: 4,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            history_window_minutes: 60,
            poll_interval_minutes: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/drawbridge/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("drawbridge")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"sync.poll_interval_minutes"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- remote ---
        if self.remote.token.trim().is_empty() {
            errors.push(ValidationError {
                field: "remote.token".into(),
                message: "must not be empty".into(),
            });
        }
        if self.remote.team_id.trim().is_empty() {
            errors.push(ValidationError {
                field: "remote.team_id".into(),
                message: "must not be empty".into(),
            });
        }
        if self.remote.base_url.trim().is_empty() {
            errors.push(ValidationError {
                field: "remote.base_url".into(),
                message: "must not be empty".into(),
            });
        }
        if self.remote.request_timeout_secs == 0 {
            errors.push(ValidationError {
                field: "remote.request_timeout_secs".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.remote.requests_per_second == 0 {
            errors.push(ValidationError {
                field: "remote.requests_per_second".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- webhook ---
        if self.webhook.url.trim().is_empty() {
            errors.push(ValidationError {
                field: "webhook.url".into(),
                message: "must not be empty".into(),
            });
        }

        // --- sync ---
        if self.sync.history_window_minutes == 0 {
            errors.push(ValidationError {
                field: "sync.history_window_minutes".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.sync.poll_interval_minutes == 0 {
            errors.push(ValidationError {
                field: "sync.poll_interval_minutes".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        // --- identities ---
        for (handle, email) in &self.identities {
            if let Err(err) = crate::identity::validate_entry(handle, email) {
                errors.push(ValidationError {
                    field: format!("identities.{handle}"),
                    message: err.to_string(),
                });
            }
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use drawbridge_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .remote_token("canvas-token")
///     .remote_team_id("team-1")
///     .webhook_url("https://hooks.example.com/activity")
///     .identity("Alice", "alice@example.com")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- remote ---

    pub fn remote_token(mut self, token: impl Into<String>) -> Self {
        self.config.remote.token = token.into();
        self
    }

    pub fn remote_team_id(mut self, team_id: impl Into<String>) -> Self {
        self.config.remote.team_id = team_id.into();
        self
    }

    pub fn remote_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.remote.base_url = base_url.into();
        self
    }

    pub fn remote_request_timeout_secs(mut self, seconds: u64) -> Self {
        self.config.remote.request_timeout_secs = seconds;
        self
    }

    pub fn remote_requests_per_second(mut self, n: u32) -> Self {
        self.config.remote.requests_per_second = n;
        self
    }

    // --- webhook ---

    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.config.webhook.url = url.into();
        self
    }

    // --- sync ---

    pub fn sync_history_window_minutes(mut self, minutes: u64) -> Self {
        self.config.sync.history_window_minutes = minutes;
        self
    }

    pub fn sync_poll_interval_minutes(mut self, minutes: u64) -> Self {
        self.config.sync.poll_interval_minutes = minutes;
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- identities ---

    pub fn identity(mut self, handle: impl Into<String>, email: impl Into<String>) -> Self {
        self.config.identities.insert(handle.into(), email.into());
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
