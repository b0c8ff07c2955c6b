//! Drawbridge Remote - Canvas API client and webhook adapter
//!
//! Provides async adapters for both sides of the pipeline:
//! - Read access to the Canvas design service (projects, files, versions)
//! - Outbound delivery to the team-communication webhook
//!
//! ## Modules
//!
//! - [`client`] - Canvas REST API HTTP client
//! - [`provider`] - [`IDesignProvider`](drawbridge_core::ports::IDesignProvider)
//!   adapter applying the shared request gate
//! - [`rate_limit`] - Process-wide token bucket gating all remote reads
//! - [`sink`] - Webhook [`IEventSink`](drawbridge_core::ports::IEventSink) adapter

pub mod client;
pub mod provider;
pub mod rate_limit;
pub mod sink;

pub use client::CanvasClient;
pub use provider::CanvasDesignProvider;
pub use rate_limit::RequestGate;
pub use sink::WebhookSink;
