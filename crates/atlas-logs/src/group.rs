//! Partitioning flags by the check that produced them.

use std::collections::BTreeMap;

use atlas_core::{CoreError, FlagRecord};

/// Flags keyed by check name, in lexicographic check order.
pub type FlagsByCheck = BTreeMap<String, Vec<FlagRecord>>;

/// Partition `records` by `properties.generator`.
///
/// Every record lands in exactly one group and keeps its relative order.
///
/// # Errors
///
/// Returns [`CoreError::MalformedFlag`] for the first record without a
/// string generator.
pub fn group_by_check(records: Vec<FlagRecord>) -> Result<FlagsByCheck, CoreError> {
    let mut groups = FlagsByCheck::new();
    for record in records {
        let check = record.check_name()?.to_owned();
        groups.entry(check).or_default().push(record);
    }
    Ok(groups)
}
