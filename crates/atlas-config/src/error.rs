//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A required configuration section is not configured.
    #[error("Configuration section '{section}' is not configured (missing required fields)")]
    NotConfigured { section: String },

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// The checks-config file could not be read.
    #[error("Cannot read checks config {}: {source}", path.display())]
    ChecksRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The checks-config file is not valid JSON.
    #[error("Cannot parse checks config {}: {source}", path.display())]
    ChecksParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The checks-config file is valid JSON but not an object keyed by check name.
    #[error("Checks config {} must be a JSON object keyed by check name", path.display())]
    ChecksShape { path: PathBuf },
}
