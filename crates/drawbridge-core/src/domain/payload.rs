//! Outbound activity payload and wire schema
//!
//! One payload is produced per (file, editor) pair and POSTed to the
//! team-communication webhook. The receiver dedupes repeated events about
//! the same subject using `dedupe_strategy` together with
//! `attachment.source_id`, which is why delivery only needs at-least-once
//! semantics.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::activity::{DesignFile, Editor};

// ============================================================================
// Integration constants
// ============================================================================

/// Event reason reported for every edit activity
pub const REASON_EDITED: &str = "EDITED";

/// Receiver-side dedupe instruction: upsert by attachment source id
pub const DEDUPE_STRATEGY: &str = "upsert_by_source";

/// Provider slug for the design service
pub const PROVIDER: &str = "canvas";

/// Human-readable provider name
pub const PROVIDER_NAME: &str = "Canvas";

/// Attachment type for activity events
pub const ATTACHMENT_TYPE: &str = "activity";

/// Attachment subtype for design edits
pub const ATTACHMENT_SUBTYPE: &str = "design_edit";

/// URL template for linking back to a file; `{}` receives the file key
const FILE_URL_TEMPLATE: &str = "https://www.canvas.design/file/";

// ============================================================================
// Wire types
// ============================================================================

/// Attachment describing the edited file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// The file key; matches exactly one file from the producing cycle
    pub source_id: String,
    /// Provider slug, constant for this integration
    pub provider: String,
    /// Human-readable provider name, constant for this integration
    pub provider_name: String,
    /// Deep link to the file, derived deterministically from the key
    pub html_url: String,
    /// Current file name
    pub name: String,
    /// Attachment type, constant for this integration
    #[serde(rename = "type")]
    pub kind: String,
    /// Attachment subtype, constant for this integration
    pub subtype: String,
}

/// A single outbound activity event
///
/// The payload carries no wall-clock-derived fields: running the pipeline
/// twice against identical remote state produces byte-identical payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPayload {
    /// Deterministic digest of the recipient email (see [`email_hash`])
    pub email_hash: String,
    /// Always false: edits are observed, never scheduled
    pub is_future: bool,
    /// Always [`REASON_EDITED`]
    pub reason: String,
    /// Always [`DEDUPE_STRATEGY`]
    pub dedupe_strategy: String,
    /// The edited file
    pub attachment: Attachment,
}

impl ActivityPayload {
    /// Builds the payload for one editor of one file
    pub fn for_editor(file: &DesignFile, editor: &Editor) -> Self {
        Self {
            email_hash: email_hash(&editor.email),
            is_future: false,
            reason: REASON_EDITED.to_string(),
            dedupe_strategy: DEDUPE_STRATEGY.to_string(),
            attachment: Attachment {
                source_id: file.key.clone(),
                provider: PROVIDER.to_string(),
                provider_name: PROVIDER_NAME.to_string(),
                html_url: file_url(&file.key),
                name: file.name.clone(),
                kind: ATTACHMENT_TYPE.to_string(),
                subtype: ATTACHMENT_SUBTYPE.to_string(),
            },
        }
    }
}

/// Deep link to a file on the design service
pub fn file_url(file_key: &str) -> String {
    format!("{FILE_URL_TEMPLATE}{file_key}")
}

/// Deterministic one-way digest of an email address
///
/// The email is trimmed and lowercased before hashing so that differently
/// spelled entries for the same mailbox collapse to one recipient on the
/// receiving side. Same input always yields the same output, across runs
/// and processes (plain SHA-256, hex encoded).
pub fn email_hash(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    hex::encode(digest)
}
