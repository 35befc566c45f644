use atlas_config::AtlasConfig;
use figment::Jail;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("ATLAS_CHECKS_MAPROULETTE__HOSTNAME", "env.maproulette.test");
        jail.set_env("ATLAS_CHECKS_MAPROULETTE__API_KEY", "env-key");
        jail.set_env("ATLAS_CHECKS_RETRY__MAX_ATTEMPTS", "5");

        let config = AtlasConfig::load().expect("config loads");
        assert_eq!(config.maproulette.hostname, "env.maproulette.test");
        assert_eq!(config.maproulette.api_key, "env-key");
        assert_eq!(config.retry.max_attempts, 5);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".atlas-checks")?;
        jail.create_file(
            ".atlas-checks/config.toml",
            r#"
[maproulette]
hostname = "from-toml"
api_key = "toml-key"
"#,
        )?;
        jail.set_env("ATLAS_CHECKS_MAPROULETTE__HOSTNAME", "from-env");

        let config = AtlasConfig::load().expect("config loads");
        assert_eq!(config.maproulette.hostname, "from-env");
        assert_eq!(config.maproulette.api_key, "toml-key");
        Ok(())
    });
}

#[test]
fn single_underscore_does_not_nest() {
    Jail::expect_with(|jail| {
        jail.set_env("ATLAS_CHECKS_MAPROULETTE_HOSTNAME", "ignored");

        let config = AtlasConfig::load().expect("config loads");
        assert!(config.maproulette.hostname.is_empty());
        Ok(())
    });
}
