//! Payload builder
//!
//! Resolves extracted editors against the identity table and converts a
//! [`SyncEntry`] into outbound activity payloads, one per editor with a
//! resolved email. An unresolvable handle is skipped with a diagnostic;
//! it never fails the cycle.

use drawbridge_core::domain::activity::{Editor, SyncEntry, VersionUser};
use drawbridge_core::domain::payload::ActivityPayload;
use drawbridge_core::identity::IdentityResolver;
use tracing::warn;

/// Maps extracted version authors to editors with resolved emails
///
/// Editors whose handle is missing from the identity table are dropped
/// with a `warn!` diagnostic. Order is preserved.
pub fn resolve_editors(users: &[VersionUser], resolver: &IdentityResolver) -> Vec<Editor> {
    users
        .iter()
        .filter_map(|user| match resolver.resolve(&user.handle) {
            Some(email) => Some(Editor {
                name: user.handle.clone(),
                email: email.to_string(),
            }),
            None => {
                warn!(
                    handle = %user.handle,
                    user_id = %user.id,
                    "No email configured for editor, skipping"
                );
                None
            }
        })
        .collect()
}

/// Converts a sync entry into payloads, one per resolved editor
///
/// Pure: repeated calls with the same entry produce byte-identical
/// payloads.
pub fn build_payloads(entry: &SyncEntry) -> Vec<ActivityPayload> {
    entry
        .editors
        .iter()
        .map(|editor| ActivityPayload::for_editor(&entry.file, editor))
        .collect()
}
