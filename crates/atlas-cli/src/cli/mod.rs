use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `atlas-checks` binary.
#[derive(Debug, Parser)]
#[command(
    name = "atlas-checks",
    version,
    about = "Atlas Checks flag tools - MapRoulette upload and log utilities"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no progress)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};

    const UPLOAD: [&str; 6] = [
        "atlas-checks",
        "mr-upload",
        "--input-folder",
        "logs",
        "--checks-config",
        "configuration.json",
    ];

    fn upload_with(extra: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(UPLOAD.iter().chain(extra))
    }

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["atlas-checks", "--format", "raw", "--verbose", "log-count", "a.log"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::LogCount(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["atlas-checks", "log-count", "a.log", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["atlas-checks", "--format", "xml", "log-count", "a.log"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn upload_parses_lists_and_project_id() {
        let cli = upload_with(&[
            "--hostname",
            "maproulette.org",
            "--api-key",
            "k",
            "--project-id",
            "12",
            "--countries",
            "USA,CAN",
            "--checks",
            "SinkIslandCheck",
            "--verify",
        ])
        .expect("cli should parse");

        let Commands::MrUpload(args) = cli.command else {
            panic!("expected mr-upload");
        };
        assert_eq!(args.input_folder, PathBuf::from("logs"));
        assert_eq!(args.project.project_id, Some(12));
        assert_eq!(args.project.project_name, None);
        assert_eq!(args.countries, vec!["USA", "CAN"]);
        assert_eq!(args.checks, vec!["SinkIslandCheck"]);
        assert_eq!(args.verify, Some(true));
        assert!(!args.reuse_challenges);
    }

    #[test]
    fn verify_accepts_explicit_false_and_defaults_to_unset() {
        let Commands::MrUpload(args) = upload_with(&["--project-id", "1", "--verify=false"])
            .expect("cli should parse")
            .command
        else {
            panic!("expected mr-upload");
        };
        assert_eq!(args.verify, Some(false));

        let Commands::MrUpload(args) = upload_with(&["--project-id", "1"]).expect("cli should parse").command
        else {
            panic!("expected mr-upload");
        };
        assert_eq!(args.verify, None);
    }

    #[test]
    fn upload_requires_exactly_one_project_selector() {
        assert!(upload_with(&[]).is_err());
        assert!(upload_with(&["--project-id", "1", "--project-name", "p"]).is_err());
        assert!(upload_with(&["--project-name", "p"]).is_ok());
    }

    #[test]
    fn split_output_defaults_to_output_folder() {
        let cli = Cli::try_parse_from(["atlas-checks", "log-split", "logs"]).expect("cli should parse");
        let Commands::LogSplit(args) = cli.command else {
            panic!("expected log-split");
        };
        assert_eq!(args.output, PathBuf::from("./output"));
    }

    #[test]
    fn diff_takes_three_positionals() {
        assert!(Cli::try_parse_from(["atlas-checks", "log-diff", "a", "b"]).is_err());
        let cli = Cli::try_parse_from(["atlas-checks", "log-diff", "a", "b", "out"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::LogDiff(_)));
    }
}
