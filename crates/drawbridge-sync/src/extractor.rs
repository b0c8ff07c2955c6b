//! Activity extractor
//!
//! Given a file's version history (newest first) and the current sync
//! marker, computes the distinct editors active since that marker.
//!
//! The first (index 0) version is always included regardless of its
//! timestamp: a file flagged as recently modified must report at least
//! one editor even when all version timestamps sit at or before the
//! marker (clock skew at the remote service).

use std::collections::HashSet;

use drawbridge_core::domain::activity::{Version, VersionUser};
use drawbridge_core::domain::marker::SyncMarker;

/// Distinct editors active since `marker`, in discovery order
///
/// Walks the newest-first list and includes a version's author when it is
/// the first element or its `created_at` is strictly after the marker.
/// Authors are deduplicated by user id; because the walk is newest-first,
/// the retained handle spelling is the most recently seen one. A file
/// with zero versions yields an empty list (non-fatal).
pub fn active_editors(versions: &[Version], marker: SyncMarker) -> Vec<VersionUser> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut editors = Vec::new();

    for (index, version) in versions.iter().enumerate() {
        let in_window = index == 0 || version.created_at > marker.timestamp();
        if in_window && seen.insert(&version.user.id) {
            editors.push(version.user.clone());
        }
    }

    editors
}
