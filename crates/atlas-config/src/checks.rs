//! Checks configuration: per-check challenge presentation parameters.
//!
//! The file is the Atlas Checks `configuration.json`: one JSON object keyed
//! by check name. Only the `challenge` sub-object of each entry matters here,
//! and nothing beyond JSON well-formedness is validated. Missing or oddly
//! typed fields fall back to defaults where they are used.

use std::path::Path;

use serde_json::{Map, Value};

use crate::ConfigError;

/// Key of the challenge sub-object inside a check entry.
pub const CHALLENGE_KEY: &str = "challenge";

/// Parsed checks-config file. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChecksConfig {
    checks: Map<String, Value>,
}

impl ChecksConfig {
    /// Read and parse a checks-config file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ChecksRead`] if the file cannot be read,
    /// [`ConfigError::ChecksParse`] if it is not valid JSON, and
    /// [`ConfigError::ChecksShape`] if the top level is not an object.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ChecksRead {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&raw).map_err(|source| ConfigError::ChecksParse {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_value(value).ok_or_else(|| ConfigError::ChecksShape {
            path: path.to_path_buf(),
        })?;
        tracing::debug!(path = %path.display(), checks = config.len(), "loaded checks config");
        Ok(config)
    }

    /// Wrap an already parsed JSON value. `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(checks) => Some(Self { checks }),
            _ => None,
        }
    }

    /// The `challenge` object configured for a check, if any.
    ///
    /// Entries that are not objects, or whose `challenge` is not an object,
    /// count as absent.
    #[must_use]
    pub fn challenge(&self, check_name: &str) -> Option<&Map<String, Value>> {
        self.checks
            .get(check_name)?
            .get(CHALLENGE_KEY)
            .and_then(Value::as_object)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn check_names(&self) -> impl Iterator<Item = &str> {
        self.checks.keys().map(String::as_str)
    }
}
