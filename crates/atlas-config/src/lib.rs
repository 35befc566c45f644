//! # atlas-config
//!
//! Configuration loading for Atlas Checks tooling.
//!
//! Two kinds of configuration live here:
//! - [`AtlasConfig`]: how the tools connect to MapRoulette and retry, layered
//!   with figment.
//! - [`ChecksConfig`]: the Atlas Checks `configuration.json` that carries
//!   per-check challenge parameters.
//!
//! `AtlasConfig` sources (in priority order, highest wins):
//! 1. Environment variables (`ATLAS_CHECKS_*` prefix, `__` as separator)
//! 2. Project-level `.atlas-checks/config.toml`
//! 3. User-level `~/.config/atlas-checks/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags are applied on top by the binary.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ATLAS_CHECKS_MAPROULETTE__HOSTNAME` -> `maproulette.hostname`,
//! `ATLAS_CHECKS_RETRY__MAX_ATTEMPTS` -> `retry.max_attempts`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use atlas_config::AtlasConfig;
//!
//! let config = AtlasConfig::load_with_dotenv().expect("config");
//! if config.maproulette.is_configured() {
//!     println!("MapRoulette API: {}", config.maproulette.api_base_url());
//! }
//! ```

mod checks;
mod error;
mod maproulette;
mod retry;

pub use checks::{CHALLENGE_KEY, ChecksConfig};
pub use error::ConfigError;
pub use maproulette::MapRouletteConfig;
pub use retry::RetryConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every configuration key.
pub const ENV_PREFIX: &str = "ATLAS_CHECKS_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AtlasConfig {
    #[serde(default)]
    pub maproulette: MapRouletteConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl AtlasConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Err(error) = dotenvy::dotenv() {
            if !error.not_found() {
                tracing::warn!(%error, "failed to read .env file");
            }
        }
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".atlas-checks/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("atlas-checks").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = AtlasConfig::default();
        assert!(!config.maproulette.is_configured());
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: AtlasConfig = AtlasConfig::figment().extract()?;
            assert!(!config.maproulette.is_configured());
            assert_eq!(config.maproulette.timeout_secs, 60);
            Ok(())
        });
    }
}
