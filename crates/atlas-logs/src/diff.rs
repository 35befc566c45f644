//! Diffing two flag sets.
//!
//! Two flags are the same when they come from the same check and flag the
//! same set of OSM identifiers. Identifier order does not matter.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use atlas_core::{CoreError, FlagRecord};
use serde::Serialize;
use serde_json::Value;

use crate::error::LogError;

pub const ADDED_FILE: &str = "added.log";
pub const REMOVED_FILE: &str = "removed.log";

/// Join key of a flag: check name plus sorted identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlagKey {
    pub check: String,
    pub identifiers: Option<Vec<String>>,
}

impl FlagKey {
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedFlag`] if the flag has no generator.
    pub fn of(flag: &FlagRecord) -> Result<Self, CoreError> {
        let identifiers = flag.identifiers().and_then(Value::as_array).map(|items| {
            let mut ids: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            ids.sort_unstable();
            ids
        });
        Ok(Self {
            check: flag.check_name()?.to_owned(),
            identifiers,
        })
    }
}

/// Flags present only in `current` (added) or only in `baseline` (removed).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagDiff {
    pub added: Vec<FlagRecord>,
    pub removed: Vec<FlagRecord>,
    /// Flags of `current` that also appear in `baseline`.
    pub unchanged: usize,
}

/// Counts and files produced by [`write_diff`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub added_path: PathBuf,
    pub removed_path: PathBuf,
}

/// Compare two flag sets, keeping the input order of each side.
///
/// # Errors
///
/// Returns [`CoreError::MalformedFlag`] for a flag without a generator on
/// either side.
pub fn diff_flags(baseline: &[FlagRecord], current: &[FlagRecord]) -> Result<FlagDiff, CoreError> {
    let baseline_keys = keys(baseline)?;
    let current_keys = keys(current)?;

    let mut diff = FlagDiff::default();
    for flag in current {
        if baseline_keys.contains(&FlagKey::of(flag)?) {
            diff.unchanged += 1;
        } else {
            diff.added.push(flag.clone());
        }
    }
    for flag in baseline {
        if !current_keys.contains(&FlagKey::of(flag)?) {
            diff.removed.push(flag.clone());
        }
    }
    Ok(diff)
}

fn keys(flags: &[FlagRecord]) -> Result<HashSet<FlagKey>, CoreError> {
    flags.iter().map(FlagKey::of).collect()
}

/// Write `added.log` and `removed.log` into `output_dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`LogError::Io`] when the directory or a file cannot be written.
pub fn write_diff(diff: &FlagDiff, output_dir: &Path) -> Result<DiffSummary, LogError> {
    std::fs::create_dir_all(output_dir).map_err(|e| LogError::io(output_dir, e))?;
    let added_path = output_dir.join(ADDED_FILE);
    let removed_path = output_dir.join(REMOVED_FILE);
    serde_jsonlines::write_json_lines(&added_path, &diff.added)
        .map_err(|e| LogError::io(&added_path, e))?;
    serde_jsonlines::write_json_lines(&removed_path, &diff.removed)
        .map_err(|e| LogError::io(&removed_path, e))?;

    tracing::info!(
        added = diff.added.len(),
        removed = diff.removed.len(),
        unchanged = diff.unchanged,
        "wrote flag diff"
    );
    Ok(DiffSummary {
        added: diff.added.len(),
        removed: diff.removed.len(),
        unchanged: diff.unchanged,
        added_path,
        removed_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn flag(check: &str, ids: Value) -> FlagRecord {
        FlagRecord::new(json!({"properties": {"generator": check, "identifiers": ids}}))
    }

    #[test]
    fn detects_added_and_removed() {
        let baseline = vec![flag("A", json!([1])), flag("A", json!([2])), flag("B", json!([1]))];
        let current = vec![flag("A", json!([1])), flag("B", json!([1])), flag("B", json!([9]))];

        let diff = diff_flags(&baseline, &current).unwrap();
        assert_eq!(diff.added, vec![flag("B", json!([9]))]);
        assert_eq!(diff.removed, vec![flag("A", json!([2]))]);
        assert_eq!(diff.unchanged, 2);
    }

    #[test]
    fn same_identifiers_from_other_check_differ() {
        let diff = diff_flags(&[flag("A", json!([1]))], &[flag("B", json!([1]))]).unwrap();
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.removed.len(), 1);
    }

    #[test]
    fn identifier_order_and_type_are_ignored() {
        let diff = diff_flags(
            &[flag("A", json!([2, "1"]))],
            &[flag("A", json!(["2", 1]))],
        )
        .unwrap();
        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());
        assert_eq!(diff.unchanged, 1);
    }

    #[test]
    fn malformed_flag_is_an_error() {
        let bad = FlagRecord::new(json!({"features": []}));
        assert!(diff_flags(&[bad], &[]).is_err());
    }
}
