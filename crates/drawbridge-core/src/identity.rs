//! Identity resolver - static handle-to-email mapping
//!
//! The design service reports editors by display handle; the webhook wants
//! email-derived recipients. The mapping is a static table loaded once at
//! startup from configuration. Lookups are case-insensitive and
//! whitespace-trimmed exact matches.
//!
//! A missing entry is not an error: the caller skips the editor and logs a
//! diagnostic, the cycle continues.

use std::collections::HashMap;

use crate::domain::errors::DomainError;

/// Checks one identity table entry for structural validity
///
/// Handles must be non-empty after trimming and emails must at least
/// carry an `@`. Used by configuration validation before the resolver
/// is built.
pub fn validate_entry(handle: &str, email: &str) -> Result<(), DomainError> {
    if handle.trim().is_empty() {
        return Err(DomainError::EmptyHandle);
    }
    if !email.contains('@') {
        return Err(DomainError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

/// Case-insensitive, trim-normalized handle → email lookup table
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    /// Normalized handle → email
    entries: HashMap<String, String>,
}

/// Normalizes a handle for lookup: trim surrounding whitespace, lowercase
fn normalize(handle: &str) -> String {
    handle.trim().to_lowercase()
}

impl IdentityResolver {
    /// Builds a resolver from a raw handle → email mapping
    ///
    /// Keys are normalized once here; duplicate keys that collide after
    /// normalization keep the last entry.
    pub fn new(identities: &HashMap<String, String>) -> Self {
        let entries = identities
            .iter()
            .map(|(handle, email)| (normalize(handle), email.clone()))
            .collect();
        Self { entries }
    }

    /// Resolves a display handle to its configured email address
    ///
    /// Returns `None` when the handle is unknown. Matching is exact after
    /// trimming and lowercasing both sides.
    pub fn resolve(&self, handle: &str) -> Option<&str> {
        self.entries.get(&normalize(handle)).map(String::as_str)
    }

    /// Number of configured identities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no identities are configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
