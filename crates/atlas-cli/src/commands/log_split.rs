use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LogSplitArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SplitResponse {
    output: String,
    files: Vec<atlas_logs::SplitFile>,
}

/// Handle `atlas-checks log-split`.
pub fn handle(args: &LogSplitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let files = atlas_logs::split_by_check(&args.logs, &args.output).with_context(|| {
        format!(
            "failed to split {} into {}",
            args.logs.display(),
            args.output.display()
        )
    })?;
    output(
        &SplitResponse {
            output: args.output.display().to_string(),
            files,
        },
        flags.format,
    )
}
