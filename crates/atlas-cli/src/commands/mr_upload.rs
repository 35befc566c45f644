use anyhow::Context;
use atlas_config::MapRouletteConfig;
use atlas_maproulette::{
    MapRouletteClient, ProjectSelector, UploadEvent, UploadRequest, Uploader,
};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::MrUploadArgs;
use crate::output::output;
use crate::progress::Progress;

/// Handle `atlas-checks mr-upload`.
pub async fn handle(args: &MrUploadArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut config = bootstrap::load_config()?;
    apply_overrides(&mut config.maproulette, args);

    let client = MapRouletteClient::new(&config.maproulette, config.retry.clone())
        .context("failed to set up MapRoulette client")?;
    let request = upload_request(args, config.maproulette.batch_size)?;
    let uploader = Uploader::new(client);

    let mut progress: Option<Progress> = None;
    let result = uploader
        .run_with(&request, |event| match event {
            UploadEvent::Planned { challenges, flags: flag_count } => {
                let total = u64::try_from(challenges).unwrap_or(u64::MAX);
                let bar = Progress::bar(total, &format!("{flag_count} flags"));
                progress = Some(bar);
            }
            UploadEvent::ChallengeDone(upload) => {
                if let Some(bar) = &progress {
                    bar.set_message(&upload.check);
                    bar.inc(1);
                }
            }
        })
        .await;

    let summary = match result {
        Ok(summary) => {
            if let Some(bar) = &progress {
                bar.finish_ok(&format!("{} tasks uploaded", summary.total_tasks()));
            }
            summary
        }
        Err(error) => {
            if let Some(bar) = &progress {
                bar.finish_err("upload failed");
            }
            return Err(error).context("MapRoulette upload failed");
        }
    };

    output(&summary, flags.format)
}

/// Command-line connection flags win over every configuration layer.
fn apply_overrides(config: &mut MapRouletteConfig, args: &MrUploadArgs) {
    if let Some(hostname) = &args.hostname {
        hostname.clone_into(&mut config.hostname);
    }
    if let Some(api_key) = &args.api_key {
        api_key.clone_into(&mut config.api_key);
    }
    if let Some(cert) = &args.cert_fp {
        cert.clone_into(&mut config.cert_path);
    }
    if let Some(key) = &args.key_fp {
        key.clone_into(&mut config.key_path);
    }
    if let Some(verify) = args.verify {
        config.verify_tls = verify;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
}

fn upload_request(args: &MrUploadArgs, batch_size: usize) -> anyhow::Result<UploadRequest> {
    let project = match (&args.project.project_id, &args.project.project_name) {
        (Some(id), _) => ProjectSelector::Id(*id),
        (None, Some(name)) => ProjectSelector::Name(name.clone()),
        (None, None) => anyhow::bail!("one of --project-id or --project-name is required"),
    };

    let mut request = UploadRequest::new(&args.input_folder, &args.checks_config, project);
    request.countries = non_empty(&args.countries);
    request.checks = non_empty(&args.checks);
    request.reuse_challenges = args.reuse_challenges;
    request.batch_size = batch_size;
    Ok(request)
}

fn non_empty(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::{Cli, Commands};

    fn parse(extra: &[&str]) -> MrUploadArgs {
        let base = [
            "atlas-checks",
            "mr-upload",
            "--input-folder",
            "logs",
            "--checks-config",
            "cfg.json",
        ];
        let cli = Cli::try_parse_from(base.iter().chain(extra)).expect("cli should parse");
        match cli.command {
            Commands::MrUpload(args) => args,
            other => panic!("expected mr-upload, got {other:?}"),
        }
    }

    #[test]
    fn flags_override_config() {
        let args = parse(&[
            "--project-id",
            "1",
            "--hostname",
            "mr.example.org",
            "--api-key",
            "flag-key",
            "--cert-fp",
            "c.pem",
            "--key-fp",
            "k.pem",
            "--verify",
            "--batch-size",
            "100",
        ]);
        let mut config = MapRouletteConfig {
            hostname: "from-file".into(),
            api_key: "file-key".into(),
            ..MapRouletteConfig::default()
        };
        apply_overrides(&mut config, &args);

        assert_eq!(config.hostname, "mr.example.org");
        assert_eq!(config.api_key, "flag-key");
        assert_eq!(config.client_identity_paths(), Some(("c.pem", "k.pem")));
        assert!(config.verify_tls);
        assert_eq!(config.batch_size, 100);
    }

    #[test]
    fn absent_flags_keep_config() {
        let args = parse(&["--project-id", "1"]);
        let mut config = MapRouletteConfig {
            hostname: "from-file".into(),
            verify_tls: true,
            ..MapRouletteConfig::default()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.hostname, "from-file");
        assert!(config.verify_tls);
        assert_eq!(config.batch_size, 5000);
    }

    #[test]
    fn verify_false_turns_off_configured_verification() {
        let args = parse(&["--project-id", "1", "--verify=false"]);
        let mut config = MapRouletteConfig {
            verify_tls: true,
            ..MapRouletteConfig::default()
        };
        apply_overrides(&mut config, &args);
        assert!(!config.verify_tls);
    }

    #[test]
    fn request_carries_filters_and_project() {
        let args = parse(&[
            "--project-name",
            "Atlas",
            "--countries",
            "USA,,CAN",
            "--checks",
            "A",
            "--reuse-challenges",
        ]);
        let request = upload_request(&args, 250).unwrap();

        assert_eq!(request.input_folder, PathBuf::from("logs"));
        assert_eq!(request.checks_config, PathBuf::from("cfg.json"));
        assert_eq!(request.project, ProjectSelector::Name("Atlas".into()));
        assert_eq!(request.countries, vec!["USA", "CAN"]);
        assert_eq!(request.checks, vec!["A"]);
        assert!(request.reuse_challenges);
        assert_eq!(request.batch_size, 250);
    }
}
