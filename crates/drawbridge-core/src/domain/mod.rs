//! Domain entities and business logic
//!
//! This module contains the core domain types for Drawbridge:
//! - Activity types describing remote projects, files, versions and editors
//! - The sync marker that bounds each polling window
//! - The outbound activity payload and its wire schema
//! - Domain-specific error types

pub mod activity;
pub mod errors;
pub mod marker;
pub mod payload;

// Re-export commonly used types
pub use activity::{DesignFile, Editor, Project, SyncEntry, Version, VersionUser};
pub use errors::DomainError;
pub use marker::SyncMarker;
pub use payload::{ActivityPayload, Attachment};
