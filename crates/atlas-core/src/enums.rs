//! Challenge difficulty and default priority lookup tables.
//!
//! The checks config spells these as upper-case words (`EASY`, `HIGH`, ...);
//! MapRoulette expects small integers. Both directions are fixed tables.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// How hard the tasks of a challenge are to fix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Expert,
}

impl Difficulty {
    /// Parse the checks-config spelling. Unknown words yield `None`.
    #[must_use]
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "EASY" => Some(Self::Easy),
            "NORMAL" => Some(Self::Normal),
            "EXPERT" => Some(Self::Expert),
            _ => None,
        }
    }

    /// Numeric value sent to MapRoulette.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Normal => 2,
            Self::Expert => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Normal => "NORMAL",
            Self::Expert => "EXPERT",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DefaultPriority
// ---------------------------------------------------------------------------

/// Priority assigned to tasks that match none of the priority rules.
///
/// MapRoulette orders priorities inversely: `HIGH` is 0, `LOW` is 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefaultPriority {
    High,
    Medium,
    #[default]
    Low,
}

impl DefaultPriority {
    /// Parse the checks-config spelling. Unknown words yield `None`.
    #[must_use]
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "HIGH" => Some(Self::High),
            "MEDIUM" => Some(Self::Medium),
            "LOW" => Some(Self::Low),
            _ => None,
        }
    }

    /// Numeric value sent to MapRoulette.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for DefaultPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("EASY", 1)]
    #[case("NORMAL", 2)]
    #[case("EXPERT", 3)]
    fn difficulty_table(#[case] word: &str, #[case] expected: u8) {
        let difficulty = Difficulty::from_config(word).expect("known difficulty");
        assert_eq!(difficulty.value(), expected);
        assert_eq!(difficulty.as_str(), word);
    }

    #[rstest]
    #[case("HIGH", 0)]
    #[case("MEDIUM", 1)]
    #[case("LOW", 2)]
    fn default_priority_table(#[case] word: &str, #[case] expected: u8) {
        let priority = DefaultPriority::from_config(word).expect("known priority");
        assert_eq!(priority.value(), expected);
        assert_eq!(priority.to_string(), word);
    }

    #[rstest]
    #[case("easy")]
    #[case("HARD")]
    #[case("")]
    fn unknown_words_are_rejected(#[case] word: &str) {
        assert!(Difficulty::from_config(word).is_none());
        assert!(DefaultPriority::from_config(word).is_none());
    }

    #[test]
    fn defaults_are_easy_and_low() {
        assert_eq!(Difficulty::default().value(), 1);
        assert_eq!(DefaultPriority::default().value(), 2);
    }
}
