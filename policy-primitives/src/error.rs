//! Shared error definitions for the policy crates.

use thiserror::Error;

/// Result alias for fallible policy construction.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Errors surfaced while assembling policies.
///
/// Registration, evaluation, and enforcement never fail on their own; only
/// helpers that validate host input return this type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// Policy definition failed validation.
    #[error("invalid policy: {0}")]
    InvalidPolicy(&'static str),
}
