//! Flag records read from Atlas Checks `.log` files.
//!
//! Each log line is a GeoJSON feature collection describing one flag. Only a
//! handful of `properties` are interpreted here; the record itself is kept as
//! raw JSON because it is forwarded to MapRoulette untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;

/// Names of the attributes read from a flag record.
pub mod attributes {
    pub const PROPERTIES: &str = "properties";
    pub const GENERATOR: &str = "generator";
    pub const INSTRUCTIONS: &str = "instructions";
    pub const IDENTIFIERS: &str = "identifiers";
    pub const ISO_COUNTRY_CODE: &str = "iso_country_code";
}

/// One flag: a single parsed line of a log file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagRecord(Value);

impl FlagRecord {
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// The `properties` object, if the record has one.
    #[must_use]
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.0.get(attributes::PROPERTIES).and_then(Value::as_object)
    }

    fn property(&self, key: &str) -> Option<&Value> {
        self.properties().and_then(|props| props.get(key))
    }

    /// Name of the check that produced this flag (`properties.generator`).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedFlag`] if the record has no `properties`
    /// object or the generator is missing or not a string.
    pub fn check_name(&self) -> Result<&str, CoreError> {
        let props = self
            .properties()
            .ok_or_else(|| CoreError::malformed("record has no properties object"))?;
        match props.get(attributes::GENERATOR) {
            Some(Value::String(name)) => Ok(name),
            Some(other) => Err(CoreError::malformed(format!(
                "generator is not a string: {other}"
            ))),
            None => Err(CoreError::malformed("record has no generator property")),
        }
    }

    /// Human readable fix instructions, if present.
    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.property(attributes::INSTRUCTIONS)
            .and_then(Value::as_str)
    }

    /// Raw `properties.identifiers` value.
    #[must_use]
    pub fn identifiers(&self) -> Option<&Value> {
        self.property(attributes::IDENTIFIERS)
    }

    /// ISO3 country codes of the flag.
    ///
    /// Flags spanning a border carry a comma-separated list.
    #[must_use]
    pub fn country_codes(&self) -> Vec<&str> {
        self.property(attributes::ISO_COUNTRY_CODE)
            .and_then(Value::as_str)
            .map(|codes| {
                codes
                    .split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl From<Value> for FlagRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Join a list of OSM identifiers with commas.
///
/// String identifiers are used verbatim, numbers in their decimal form.
/// Returns `None` when `identifiers` is not a JSON array.
#[must_use]
pub fn format_identifiers(identifiers: &Value) -> Option<String> {
    let items = identifiers.as_array()?;
    let parts: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();
    Some(parts.join(","))
}
