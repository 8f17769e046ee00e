//! Labels
//!
//! Domain enumerations are persisted and transported as upper snake case labels
//! (`DEEP_CLEANING`, `FREE_PAIR`, ...). This module holds the shared parse error.

use thiserror::Error;

/// A label did not match any variant of the target enumeration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} \"{value}\"")]
pub struct UnknownLabelError {
    kind: &'static str,
    value: String,
}

impl UnknownLabelError {
    /// Create an error for `value` not being a valid `kind`.
    #[must_use]
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// The enumeration that failed to parse.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}
