//! Drawbridge Sync - Activity pipeline and orchestration
//!
//! Provides the stages that turn raw remote listings into outbound
//! activity events:
//!
//! - [`extractor`] - Distinct active editors from a version history
//! - [`builder`] - Identity resolution and payload construction
//! - [`dispatcher`] - Concurrent fire-all webhook dispatch
//! - [`orchestrator`] - The poll cycle driver and marker state machine
//!
//! Stages are strictly sequential: each consumes the full typed output of
//! the previous one. Concurrency exists only *within* a stage (fan-out
//! remote reads, fan-out deliveries), never across stages.

pub mod builder;
pub mod dispatcher;
pub mod extractor;
pub mod orchestrator;

pub use orchestrator::{CycleOutcome, CycleReport, SyncOrchestrator};
