use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LogCountArgs;
use crate::output::output;

/// Handle `atlas-checks log-count`.
pub fn handle(args: &LogCountArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records = atlas_logs::read_path(&args.input)
        .with_context(|| format!("failed to read logs from {}", args.input.display()))?;
    output(&atlas_logs::count_flags(&records), flags.format)
}
