use anyhow::Context;
use atlas_config::{AtlasConfig, ENV_PREFIX};

/// Load layered configuration (`.env`, TOML files, `ATLAS_CHECKS_*`).
pub fn load_config() -> anyhow::Result<AtlasConfig> {
    let config = AtlasConfig::load_with_dotenv().context("failed to load atlas-checks configuration")?;
    warn_unconfigured(&config);
    Ok(config)
}

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
fn warn_unconfigured(config: &AtlasConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &AtlasConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let prefix = format!("{ENV_PREFIX}MAPROULETTE");
    let nested = format!("{prefix}__");
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();
    let mistyped = env_keys
        .iter()
        .any(|key| key.starts_with(&prefix) && !key.starts_with(&nested));
    if !config.maproulette.is_configured() && mistyped {
        warnings.push(format!(
            "MapRoulette config appears default while {prefix}* env vars exist. Use double underscores (example: {nested}HOSTNAME)."
        ));
    }

    warnings
}
