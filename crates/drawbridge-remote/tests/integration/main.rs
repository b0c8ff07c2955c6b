//! Integration tests for drawbridge-remote
//!
//! Uses wiremock to simulate the Canvas API and the webhook receiver,
//! and verifies end-to-end behavior of the CanvasClient, the rate-limited
//! provider adapter, and the WebhookSink.

mod common;

mod test_listings;
mod test_webhook;
