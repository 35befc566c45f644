use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LogDiffArgs;
use crate::output::output;

/// Handle `atlas-checks log-diff`.
pub fn handle(args: &LogDiffArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let baseline = atlas_logs::read_path(&args.baseline)
        .with_context(|| format!("failed to read baseline {}", args.baseline.display()))?;
    let current = atlas_logs::read_path(&args.current)
        .with_context(|| format!("failed to read current {}", args.current.display()))?;

    let diff = atlas_logs::diff_flags(&baseline, &current).context("failed to compare flags")?;
    let summary = atlas_logs::write_diff(&diff, &args.output)
        .with_context(|| format!("failed to write diff to {}", args.output.display()))?;
    output(&summary, flags.format)
}
