//! Webhook event sink adapter
//!
//! Implements the [`IEventSink`] port: one POST per activity payload to
//! the configured webhook URL. A delivery succeeds only on HTTP 200;
//! any other status (including other 2xx codes) or transport failure is
//! an error. There is no retry - the orchestrator re-evaluates the whole
//! window next cycle and the receiver's upsert dedupe absorbs repeats.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use drawbridge_core::domain::payload::ActivityPayload;
use drawbridge_core::ports::IEventSink;

/// Webhook delivery adapter
pub struct WebhookSink {
    client: Client,
    url: String,
}

impl WebhookSink {
    /// Creates a sink POSTing to `url` with the given per-request timeout
    pub fn new(url: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("Failed to build webhook HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The configured delivery URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl IEventSink for WebhookSink {
    async fn deliver(&self, payload: &ActivityPayload) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .context("Failed to POST activity payload")?;

        let status = response.status();
        if status != StatusCode::OK {
            bail!(
                "Webhook rejected payload for {}: status {}",
                payload.attachment.source_id,
                status
            );
        }

        debug!(
            source_id = %payload.attachment.source_id,
            "Payload accepted by webhook"
        );
        Ok(())
    }
}
