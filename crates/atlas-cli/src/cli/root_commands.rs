use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Upload flag logs to MapRoulette, one challenge per check.
    MrUpload(MrUploadArgs),
    /// Count flags per check in a log file or folder.
    LogCount(LogCountArgs),
    /// Split a folder of logs into one log per check.
    LogSplit(LogSplitArgs),
    /// Compare two sets of logs and write added/removed flags.
    LogDiff(LogDiffArgs),
}

#[derive(Clone, Debug, Args)]
pub struct MrUploadArgs {
    /// Folder containing `.log` / `.log.gz` flag files.
    #[arg(long)]
    pub input_folder: PathBuf,

    /// MapRoulette host, e.g. `maproulette.org`.
    #[arg(long)]
    pub hostname: Option<String>,

    /// MapRoulette API key.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// PEM client certificate.
    #[arg(long)]
    pub cert_fp: Option<String>,

    /// PEM private key for `--cert-fp`.
    #[arg(long)]
    pub key_fp: Option<String>,

    /// Verify the server's TLS certificate (`--verify` or `--verify=false`).
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub verify: Option<bool>,

    /// Atlas Checks configuration JSON with per-check challenge settings.
    #[arg(long)]
    pub checks_config: PathBuf,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Comma-separated ISO3 country codes to upload.
    #[arg(long, value_delimiter = ',')]
    pub countries: Vec<String>,

    /// Comma-separated check names to upload.
    #[arg(long, value_delimiter = ',')]
    pub checks: Vec<String>,

    /// Add tasks to an existing challenge of the same name instead of creating a new one.
    #[arg(long)]
    pub reuse_challenges: bool,

    /// Tasks per upload request.
    #[arg(long)]
    pub batch_size: Option<usize>,
}

/// Target project: exactly one of id or name.
#[derive(Clone, Debug, Args)]
#[group(required = true, multiple = false)]
pub struct ProjectArgs {
    /// Existing project id.
    #[arg(long)]
    pub project_id: Option<u64>,

    /// Project name; created if it does not exist.
    #[arg(long)]
    pub project_name: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct LogCountArgs {
    /// Log file or folder of logs.
    pub input: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct LogSplitArgs {
    /// Folder of logs to split.
    pub logs: PathBuf,

    /// Output folder.
    #[arg(long, short = 'o', default_value = "./output")]
    pub output: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct LogDiffArgs {
    /// Baseline log file or folder.
    pub baseline: PathBuf,
    /// Current log file or folder.
    pub current: PathBuf,
    /// Folder for `added.log` and `removed.log`.
    pub output: PathBuf,
}
