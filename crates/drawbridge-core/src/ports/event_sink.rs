//! Event sink port (driven/secondary port)
//!
//! Outbound delivery of activity payloads. The primary implementation
//! POSTs to a team-communication webhook; tests substitute recording
//! fakes.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::payload::ActivityPayload;

/// Delivery of one activity payload to the receiving system
///
/// A delivery is a single attempt: no retry, no backoff. `Ok(())` means
/// the receiver accepted the event (HTTP 200 for the webhook adapter);
/// anything else is an error that fails the cycle's dispatch step.
#[async_trait]
pub trait IEventSink: Send + Sync {
    /// Delivers one payload; one attempt, unordered relative to others
    async fn deliver(&self, payload: &ActivityPayload) -> Result<()>;
}
