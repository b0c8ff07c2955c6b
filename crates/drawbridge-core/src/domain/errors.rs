//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! currently the structural checks on identity table entries.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Empty or whitespace-only display handle
    #[error("Empty handle")]
    EmptyHandle,
}
