//! Splitting a folder of logs into one log file per check.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::LogError;
use crate::group::group_by_check;
use crate::reader::read_log_dir;

/// One file written by [`split_by_check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitFile {
    pub check: String,
    pub flags: usize,
    pub path: PathBuf,
}

/// Output file name for a check: `<check>-<count>.log`.
#[must_use]
pub fn split_file_name(check: &str, flags: usize) -> String {
    format!("{check}-{flags}.log")
}

/// Whether `check` is a plain file name component.
///
/// Separators and `.`/`..` would place the split file outside the output folder.
#[must_use]
pub fn is_safe_check_name(check: &str) -> bool {
    !check.is_empty() && check != "." && check != ".." && !check.contains(['/', '\\'])
}

/// Read every log in `input_dir` and write one uncompressed log per check
/// into `output_dir`, creating it if needed.
///
/// Existing files with the same name are overwritten.
///
/// # Errors
///
/// Read, parse, and malformed-flag errors from the input;
/// [`LogError::UnsafeCheckName`] before anything is written if a check name
/// is not a plain file name; [`LogError::Io`] when the output cannot be
/// written.
pub fn split_by_check(input_dir: &Path, output_dir: &Path) -> Result<Vec<SplitFile>, LogError> {
    let groups = group_by_check(read_log_dir(input_dir)?)?;
    if let Some(check) = groups.keys().find(|check| !is_safe_check_name(check)) {
        return Err(LogError::UnsafeCheckName {
            check: check.clone(),
        });
    }
    std::fs::create_dir_all(output_dir).map_err(|e| LogError::io(output_dir, e))?;

    let mut written = Vec::with_capacity(groups.len());
    for (check, flags) in groups {
        let path = output_dir.join(split_file_name(&check, flags.len()));
        serde_jsonlines::write_json_lines(&path, &flags).map_err(|e| LogError::io(&path, e))?;
        tracing::info!(check = %check, flags = flags.len(), path = %path.display(), "wrote split log");
        written.push(SplitFile {
            check,
            flags: flags.len(),
            path,
        });
    }
    Ok(written)
}
