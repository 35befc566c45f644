//! Log handling error types.

use std::path::PathBuf;

use atlas_core::CoreError;
use thiserror::Error;

/// Errors raised while reading or writing flag logs.
#[derive(Debug, Error)]
pub enum LogError {
    /// Filesystem failure on a log file or directory.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of a log file is not valid JSON.
    #[error("{}:{line}: invalid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A check name cannot be used as a file name.
    #[error("check name {check:?} cannot be used as a file name")]
    UnsafeCheckName { check: String },

    /// A record does not have the shape of a flag.
    #[error(transparent)]
    Flag(#[from] CoreError),
}

impl LogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
