//! Task construction: one MapRoulette task per flag.

use atlas_core::{FlagRecord, format_identifiers};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of one element of a create-tasks batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Id of the challenge the task belongs to.
    pub parent: u64,
    /// Comma-joined OSM identifiers of the flagged features.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The complete flag record.
    pub geometries: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

/// Build the task for `flag` under challenge `challenge_id`.
#[must_use]
pub fn build_task(flag: &FlagRecord, challenge_id: u64) -> TaskRequest {
    TaskRequest {
        parent: challenge_id,
        name: flag.identifiers().and_then(format_identifiers),
        geometries: flag.as_value().clone(),
        instruction: flag.instructions().map(str::to_owned),
    }
}
