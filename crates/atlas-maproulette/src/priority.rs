//! Priority rules attached to a challenge.
//!
//! MapRoulette assigns each task a high/medium/low priority by evaluating
//! rules against the task's properties. The checks config may write a rule
//! either in MapRoulette's own form or as a `key=value` shorthand:
//!
//! ```json
//! "highPriorityRule": {
//!     "condition": "OR",
//!     "rules": ["highway=motorway", {"value": "highway.trunk", "type": "string", "operator": "equal"}]
//! }
//! ```
//!
//! Shorthand becomes a string-equality rule on `key.value`. The whole group is
//! sent to MapRoulette as a JSON *string*.

use serde::Serialize;
use serde_json::{Value, json};

/// Value type a rule compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityType {
    String,
}

impl PriorityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
        }
    }
}

/// Comparison applied by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityOperator {
    Equal,
}

impl PriorityOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
        }
    }
}

/// A single priority rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityRule {
    /// `key.value` pair the task property must match.
    pub value: String,
    pub priority_type: PriorityType,
    pub operator: PriorityOperator,
}

impl PriorityRule {
    #[must_use]
    pub fn string_equals(key: &str, value: &str) -> Self {
        Self {
            value: format!("{key}.{value}"),
            priority_type: PriorityType::String,
            operator: PriorityOperator::Equal,
        }
    }

    /// Parse `key=value` shorthand. Anything without exactly one `=` is rejected.
    #[must_use]
    pub fn from_shorthand(shorthand: &str) -> Option<Self> {
        let mut parts = shorthand.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => Some(Self::string_equals(key, value)),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "value": self.value,
            "type": self.priority_type.as_str(),
            "operator": self.operator.as_str(),
        })
    }
}

/// Rules combined under one boolean condition (`AND` / `OR`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityRuleModel {
    pub condition: Value,
    pub rules: Vec<Value>,
}

impl PriorityRuleModel {
    /// Normalize a priority rule group from the checks config.
    ///
    /// Returns `None` for empty or non-object input. Rule entries that are
    /// objects pass through unchanged; `key=value` strings are expanded;
    /// anything else is dropped.
    #[must_use]
    pub fn from_config(group: &Value) -> Option<Self> {
        let group = group.as_object().filter(|map| !map.is_empty())?;
        let condition = group.get("condition").cloned().unwrap_or(Value::Null);
        let rules = group
            .get("rules")
            .and_then(Value::as_array)
            .map(|rules| rules.iter().filter_map(normalize_rule).collect())
            .unwrap_or_default();
        Some(Self { condition, rules })
    }

    /// JSON text in the form MapRoulette stores on the challenge.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        // Serializing a `Value` tree cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn normalize_rule(rule: &Value) -> Option<Value> {
    match rule {
        Value::Object(_) => Some(rule.clone()),
        Value::String(shorthand) => {
            let parsed = PriorityRule::from_shorthand(shorthand).map(|r| r.to_value());
            if parsed.is_none() {
                tracing::warn!(rule = %shorthand, "dropping priority rule without a single '='");
            }
            parsed
        }
        other => {
            tracing::warn!(rule = %other, "dropping priority rule of unsupported type");
            None
        }
    }
}

/// Normalize and serialize a priority rule group in one step.
#[must_use]
pub fn priority_rule_string(group: &Value) -> Option<String> {
    PriorityRuleModel::from_config(group).map(|model| model.to_json_string())
}
