//! Challenge construction from the checks config.

use atlas_config::ChecksConfig;
use atlas_core::{DefaultPriority, Difficulty};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::priority::priority_rule_string;

/// Keys of the `challenge` object in the checks config.
mod keys {
    pub const DESCRIPTION: &str = "description";
    pub const BLURB: &str = "blurb";
    pub const INSTRUCTION: &str = "instruction";
    pub const DIFFICULTY: &str = "difficulty";
    pub const DEFAULT_PRIORITY: &str = "defaultPriority";
    pub const HIGH_PRIORITY_RULE: &str = "highPriorityRule";
    pub const MEDIUM_PRIORITY_RULE: &str = "mediumPriorityRule";
    pub const LOW_PRIORITY_RULE: &str = "lowPriorityRule";
    pub const KEYWORDS: &str = "tags";
    pub const CHECKIN_COMMENT: &str = "checkinComment";
}

/// Body of a MapRoulette create-challenge call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    /// Parent project id.
    pub parent: u64,
    /// Always the check name.
    pub name: String,
    pub description: String,
    pub blurb: String,
    pub instruction: String,
    pub difficulty: u8,
    pub default_priority: u8,
    pub high_priority_rule: Option<String>,
    pub medium_priority_rule: Option<String>,
    pub low_priority_rule: Option<String>,
    #[serde(rename = "tags")]
    pub keywords: String,
    #[serde(rename = "checkinComment")]
    pub check_in_comment: String,
}

impl ChallengeRequest {
    /// A challenge for `check_name` with every field at its default.
    #[must_use]
    pub fn with_defaults(check_name: &str, project_id: u64) -> Self {
        Self {
            parent: project_id,
            name: check_name.to_owned(),
            description: String::new(),
            blurb: String::new(),
            instruction: String::new(),
            difficulty: Difficulty::default().value(),
            default_priority: DefaultPriority::default().value(),
            high_priority_rule: None,
            medium_priority_rule: None,
            low_priority_rule: None,
            keywords: String::new(),
            check_in_comment: String::new(),
        }
    }
}

/// Build the challenge for one check.
///
/// Fields present in `config[check_name].challenge` override the defaults
/// (difficulty `EASY`, priority `LOW`, empty text, no rules). Unknown
/// difficulty or priority words keep the default. The name is always the
/// check name.
#[must_use]
pub fn build_challenge(config: &ChecksConfig, check_name: &str, project_id: u64) -> ChallengeRequest {
    let mut challenge = ChallengeRequest::with_defaults(check_name, project_id);
    let Some(params) = config.challenge(check_name) else {
        tracing::debug!(check = check_name, "no challenge config, using defaults");
        return challenge;
    };

    override_text(params, keys::DESCRIPTION, &mut challenge.description);
    override_text(params, keys::BLURB, &mut challenge.blurb);
    override_text(params, keys::INSTRUCTION, &mut challenge.instruction);
    override_text(params, keys::CHECKIN_COMMENT, &mut challenge.check_in_comment);

    if let Some(keywords) = params.get(keys::KEYWORDS).and_then(keywords_text) {
        challenge.keywords = keywords;
    }

    if let Some(word) = non_empty_str(params, keys::DIFFICULTY) {
        match Difficulty::from_config(word) {
            Some(difficulty) => challenge.difficulty = difficulty.value(),
            None => tracing::warn!(check = check_name, difficulty = word, "unknown difficulty, keeping default"),
        }
    }
    if let Some(word) = non_empty_str(params, keys::DEFAULT_PRIORITY) {
        match DefaultPriority::from_config(word) {
            Some(priority) => challenge.default_priority = priority.value(),
            None => tracing::warn!(check = check_name, priority = word, "unknown default priority, keeping default"),
        }
    }

    challenge.high_priority_rule = params.get(keys::HIGH_PRIORITY_RULE).and_then(priority_rule_string);
    challenge.medium_priority_rule = params
        .get(keys::MEDIUM_PRIORITY_RULE)
        .and_then(priority_rule_string);
    challenge.low_priority_rule = params.get(keys::LOW_PRIORITY_RULE).and_then(priority_rule_string);

    challenge
}

fn non_empty_str<'a>(params: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn override_text(params: &Map<String, Value>, key: &str, field: &mut String) {
    if let Some(text) = params.get(key).and_then(Value::as_str) {
        text.clone_into(field);
    }
}

/// Keywords may be written as `"a,b"` or `["a", "b"]`.
fn keywords_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(","),
        ),
        _ => None,
    }
}
