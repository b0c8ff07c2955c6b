//! Remote activity entities
//!
//! Types describing what the design service reports: projects, design files,
//! their version histories, and the editors derived from those histories.
//! Projects, files and versions are remote-owned and fetched fresh each
//! poll cycle; `Editor` and `SyncEntry` are derived aggregates that live
//! for a single cycle only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Remote-owned records
// ============================================================================

/// A project as listed by the design service for a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Provider-assigned project identifier
    pub id: String,
    /// Human-readable project name
    pub name: String,
}

/// A design file belonging to a project
///
/// Files are identified by `key`, which is unique across the service and
/// stable across renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignFile {
    /// Unique, stable file key
    pub key: String,
    /// Current file name
    pub name: String,
    /// Timestamp of the most recent modification
    pub last_modified: DateTime<Utc>,
}

/// The author of a version, as reported by the design service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionUser {
    /// Provider-assigned user identifier (stable)
    pub id: String,
    /// Display handle (may change spelling between versions)
    pub handle: String,
}

/// A single entry in a file's version history
///
/// The remote API returns version lists newest-first; the first element
/// represents the file's current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Provider-assigned version identifier
    pub id: String,
    /// When this version was created
    pub created_at: DateTime<Utc>,
    /// Who created this version
    pub user: VersionUser,
}

// ============================================================================
// Derived aggregates
// ============================================================================

/// An editor active in the current sync window, with a resolved email
///
/// One entry per distinct user id; `name` carries the most recently seen
/// spelling of the user's handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    /// Display handle (latest spelling)
    pub name: String,
    /// Email address resolved from the identity table
    pub email: String,
}

/// Per-cycle aggregate tying a file to its versions and active editors
///
/// Built during a poll cycle and discarded after payload generation.
#[derive(Debug, Clone)]
pub struct SyncEntry {
    /// The recently modified file
    pub file: DesignFile,
    /// The file's version history (newest first)
    pub versions: Vec<Version>,
    /// Distinct editors active since the marker
    pub editors: Vec<Editor>,
}
