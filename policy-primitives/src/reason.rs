//! Explanations attached to warn and cancel decisions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque, operator-friendly explanation for why a decision fired.
///
/// `Reason` implements [`std::error::Error`] so hosts can forward it into
/// their own error plumbing unchanged. Its display text is exactly the
/// wrapped message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[error("{message}")]
#[serde(transparent)]
pub struct Reason {
    message: String,
}

impl Reason {
    /// Wraps a message into a reason.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the wrapped message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for Reason {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Reason {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Shorthand for [`Reason::new`].
#[must_use]
pub fn reason(message: impl Into<String>) -> Reason {
    Reason::new(message)
}
