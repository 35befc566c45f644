//! Cross-cutting error types for Atlas Checks tooling.
//!
//! Domain-specific errors (`LogError`, `MapRouletteError`, ...) live in their
//! respective crates. They converge into `anyhow::Error` in `atlas-cli`.

use thiserror::Error;

/// Errors that can be raised by any Atlas Checks crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A flag record does not have the shape of an Atlas Checks feature.
    #[error("Malformed flag record: {reason}")]
    MalformedFlag { reason: String },
}

impl CoreError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedFlag {
            reason: reason.into(),
        }
    }
}
