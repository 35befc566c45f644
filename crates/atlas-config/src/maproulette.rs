//! MapRoulette connection configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default URL scheme.
fn default_scheme() -> String {
    String::from("https")
}

/// Default per-request timeout.
const fn default_timeout_secs() -> u64 {
    60
}

/// Largest task batch the MapRoulette `/tasks` endpoint accepts.
const fn default_batch_size() -> usize {
    5000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapRouletteConfig {
    /// `https` or `http`.
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Host (and optional port) of the MapRoulette instance, e.g. `maproulette.org`.
    #[serde(default)]
    pub hostname: String,

    /// User API key, sent as the `apiKey` header.
    #[serde(default)]
    pub api_key: String,

    /// PEM client certificate. Used only together with `key_path`.
    #[serde(default)]
    pub cert_path: String,

    /// PEM private key for `cert_path`.
    #[serde(default)]
    pub key_path: String,

    /// Verify TLS certificates of the server.
    #[serde(default)]
    pub verify_tls: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of tasks per batch upload.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for MapRouletteConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            hostname: String::new(),
            api_key: String::new(),
            cert_path: String::new(),
            key_path: String::new(),
            verify_tls: false,
            timeout_secs: default_timeout_secs(),
            batch_size: default_batch_size(),
        }
    }
}

impl MapRouletteConfig {
    /// Check if the connection has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        !self.hostname.is_empty() && !self.api_key.is_empty()
    }

    /// Fail with [`ConfigError::NotConfigured`] unless [`is_configured`](Self::is_configured).
    ///
    /// # Errors
    ///
    /// Returns an error naming the `maproulette` section, or
    /// [`ConfigError::InvalidValue`] for an unsupported scheme or a zero batch size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "maproulette".into(),
            });
        }
        if self.scheme != "https" && self.scheme != "http" {
            return Err(ConfigError::InvalidValue {
                field: "maproulette.scheme".into(),
                reason: format!("expected 'https' or 'http', got '{}'", self.scheme),
            });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "maproulette.batch_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Base URL of the v2 API, without trailing slash.
    pub fn api_base_url(&self) -> String {
        format!(
            "{}://{}/api/v2",
            self.scheme,
            self.hostname.trim_end_matches('/')
        )
    }

    /// Certificate and key paths, when both are set.
    pub fn client_identity_paths(&self) -> Option<(&str, &str)> {
        if self.cert_path.is_empty() || self.key_path.is_empty() {
            None
        } else {
            Some((self.cert_path.as_str(), self.key_path.as_str()))
        }
    }
}
