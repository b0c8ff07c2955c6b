//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IDesignProvider`] - Read access to the design service (projects, files, versions)
//! - [`IEventSink`] - Delivery of activity payloads to the webhook

pub mod design_provider;
pub mod event_sink;

pub use design_provider::IDesignProvider;
pub use event_sink::IEventSink;
