//! Dispatcher - concurrent fire-all webhook delivery
//!
//! All payloads for a cycle are delivered concurrently and independently,
//! in no particular order. The cycle-level result is success only when
//! every delivery was accepted; a single rejection fails the whole
//! dispatch step even though other deliveries may already have landed.
//! That duplication risk is accepted: the receiver upserts by
//! `attachment.source_id`, so a re-sent event updates rather than
//! duplicates.

use anyhow::{bail, Result};
use futures_util::future::join_all;
use tracing::{debug, warn};

use drawbridge_core::domain::payload::ActivityPayload;
use drawbridge_core::ports::IEventSink;

/// Delivers every payload concurrently; fails if any delivery failed
///
/// All deliveries are issued regardless of individual outcomes (no
/// short-circuit); failures are aggregated afterwards into one error
/// carrying the count and the first cause.
pub async fn dispatch_all(sink: &dyn IEventSink, payloads: &[ActivityPayload]) -> Result<()> {
    if payloads.is_empty() {
        debug!("No payloads to dispatch");
        return Ok(());
    }

    let results = join_all(payloads.iter().map(|payload| sink.deliver(payload))).await;

    let mut failures = 0usize;
    let mut first_error = None;
    for (payload, result) in payloads.iter().zip(results) {
        if let Err(err) = result {
            warn!(
                source_id = %payload.attachment.source_id,
                error = %err,
                "Payload delivery failed"
            );
            failures += 1;
            first_error.get_or_insert(err);
        }
    }

    if let Some(cause) = first_error {
        bail!(
            "{failures} of {} deliveries failed: {cause:#}",
            payloads.len()
        );
    }

    debug!(count = payloads.len(), "All payloads accepted");
    Ok(())
}
