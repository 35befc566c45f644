//! Flag counting.

use std::collections::BTreeMap;

use atlas_core::FlagRecord;
use serde::Serialize;

/// Flag totals for a set of logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlagCounts {
    pub total: usize,
    pub by_check: BTreeMap<String, usize>,
    /// Records without a usable `properties.generator`.
    pub unattributed: usize,
}

/// Count flags in total and per check.
#[must_use]
pub fn count_flags(records: &[FlagRecord]) -> FlagCounts {
    let mut counts = FlagCounts {
        total: records.len(),
        ..FlagCounts::default()
    };
    for record in records {
        match record.check_name() {
            Ok(check) => *counts.by_check.entry(check.to_owned()).or_default() += 1,
            Err(_) => counts.unattributed += 1,
        }
    }
    counts
}
