//! MapRoulette upload error types.

use std::path::PathBuf;

use atlas_config::ConfigError;
use atlas_core::CoreError;
use atlas_logs::LogError;
use thiserror::Error;

/// Errors that can occur while building or uploading challenges and tasks.
#[derive(Debug, Error)]
pub enum MapRouletteError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// MapRoulette returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// MapRoulette returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a MapRoulette response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The client certificate or key could not be loaded.
    #[error("client identity {}: {reason}", path.display())]
    Identity { path: PathBuf, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logs(#[from] LogError),

    #[error(transparent)]
    Flag(#[from] CoreError),
}

impl MapRouletteError {
    /// Whether retrying the same request may succeed.
    ///
    /// Connection failures, timeouts, 5xx responses, and rate limiting are
    /// transient; everything else is final.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(error) => error.is_timeout() || error.is_connect(),
            Self::Api { status, .. } => *status >= 500,
            Self::RateLimited { .. } => true,
            _ => false,
        }
    }

    /// Whether a non-idempotent request may be sent again.
    ///
    /// Only failures where the server cannot have acted on the request
    /// qualify: the connection was never made, or the server refused with 429.
    /// Timeouts and 5xx may follow a committed write.
    #[must_use]
    pub fn is_safe_to_resend(&self) -> bool {
        match self {
            Self::Http(error) => error.is_connect(),
            Self::RateLimited { .. } => true,
            _ => false,
        }
    }
}
