use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::MrUpload(args) => commands::mr_upload::handle(&args, flags).await,
        Commands::LogCount(args) => commands::log_count::handle(&args, flags),
        Commands::LogSplit(args) => commands::log_split::handle(&args, flags),
        Commands::LogDiff(args) => commands::log_diff::handle(&args, flags),
    }
}
