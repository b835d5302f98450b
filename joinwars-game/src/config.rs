//! Game constants, policy switches and their validation.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{
    DEFAULT_BASE_ENTRY_COST, DEFAULT_MAX_AFFORDABLE_COST, DEFAULT_MAX_RATIO, DEFAULT_MAX_SCORE,
    DEFAULT_MAX_TURNS, DEFAULT_MIN_SCORE, DEFAULT_RESOURCE_A_COST_STEP,
    DEFAULT_RESOURCE_A_INITIAL_COST, DEFAULT_RESOURCE_B_UNIT_COST, DEFAULT_SCORE_MULTIPLIER,
    DEFAULT_STARTING_CURRENCY_OPTIONS,
};

const DEFAULT_CONSTANTS_DATA: &str = include_str!("../data/constants.json");

/// Errors raised when the game constants cannot drive a search.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },
    #[error("score window invalid (min {min} > max {max})")]
    ScoreWindow { min: u64, max: u64 },
    #[error("at least one starting currency option is required")]
    NoStartingCurrency,
    #[error("starting currency options must be positive")]
    ZeroStartingCurrency,
    #[error("starting currency {value} is listed more than once")]
    DuplicateStartingCurrency { value: u64 },
    #[error("starting currency {value} exceeds the growth cap {cap}")]
    StartingAboveCap { value: u64, cap: u64 },
    #[error("starting currency {value} is not one of the configured options")]
    UnknownStartingCurrency { value: u64 },
    #[error("failed to parse game constants: {0}")]
    Parse(String),
}

/// Per-turn currency growth rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrowthRule {
    /// `next = min(2 * current + starting, cap)`
    #[default]
    Reinvest,
    /// `next = min(2 * current, cap)`
    Doubling,
}

impl fmt::Display for GrowthRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reinvest => write!(f, "reinvest"),
            Self::Doubling => write!(f, "doubling"),
        }
    }
}

impl FromStr for GrowthRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reinvest" => Ok(Self::Reinvest),
            "doubling" => Ok(Self::Doubling),
            other => Err(format!("unknown growth rule: {other}")),
        }
    }
}

/// How ranking resolves strategies that tie on score within one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Keep whichever strategy the search produced first.
    #[default]
    FirstSeen,
    /// Prefer the cheaper strategy, then the one produced first.
    LowestCost,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstSeen => write!(f, "first-seen"),
            Self::LowestCost => write!(f, "lowest-cost"),
        }
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-seen" | "first_seen" => Ok(Self::FirstSeen),
            "lowest-cost" | "lowest_cost" => Ok(Self::LowestCost),
            other => Err(format!("unknown tie break: {other}")),
        }
    }
}

/// Fixed parameters of the game plus the policy switches of the search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default = "GameConstants::default_resource_a_initial_cost")]
    pub resource_a_initial_cost: u64,
    #[serde(default = "GameConstants::default_resource_a_cost_step")]
    pub resource_a_cost_step: u64,
    #[serde(default = "GameConstants::default_resource_b_unit_cost")]
    pub resource_b_unit_cost: u64,
    #[serde(default = "GameConstants::default_base_entry_cost")]
    pub base_entry_cost: u64,
    #[serde(default = "GameConstants::default_score_multiplier")]
    pub score_multiplier: u64,
    #[serde(default = "GameConstants::default_max_affordable_cost")]
    pub max_affordable_cost: u64,
    #[serde(default = "GameConstants::default_min_score")]
    pub min_score: u64,
    #[serde(default = "GameConstants::default_max_score")]
    pub max_score: u64,
    #[serde(default = "GameConstants::default_starting_currency_options")]
    pub starting_currency_options: Vec<u64>,
    #[serde(default = "GameConstants::default_max_turns")]
    pub max_turns: u32,
    /// Currency ceiling during growth; `None` means `max_affordable_cost`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_cap: Option<u64>,
    /// Largest allowed ratio between the two resource counts.
    #[serde(default = "GameConstants::default_max_ratio")]
    pub max_ratio: u64,
    #[serde(default)]
    pub growth_rule: GrowthRule,
    #[serde(default)]
    pub tie_break: TieBreak,
}

impl GameConstants {
    const fn default_resource_a_initial_cost() -> u64 {
        DEFAULT_RESOURCE_A_INITIAL_COST
    }

    const fn default_resource_a_cost_step() -> u64 {
        DEFAULT_RESOURCE_A_COST_STEP
    }

    const fn default_resource_b_unit_cost() -> u64 {
        DEFAULT_RESOURCE_B_UNIT_COST
    }

    const fn default_base_entry_cost() -> u64 {
        DEFAULT_BASE_ENTRY_COST
    }

    const fn default_score_multiplier() -> u64 {
        DEFAULT_SCORE_MULTIPLIER
    }

    const fn default_max_affordable_cost() -> u64 {
        DEFAULT_MAX_AFFORDABLE_COST
    }

    const fn default_min_score() -> u64 {
        DEFAULT_MIN_SCORE
    }

    const fn default_max_score() -> u64 {
        DEFAULT_MAX_SCORE
    }

    fn default_starting_currency_options() -> Vec<u64> {
        DEFAULT_STARTING_CURRENCY_OPTIONS.to_vec()
    }

    const fn default_max_turns() -> u32 {
        DEFAULT_MAX_TURNS
    }

    const fn default_max_ratio() -> u64 {
        DEFAULT_MAX_RATIO
    }

    /// Constants bundled with the crate, falling back to [`Default`] if the
    /// embedded asset is unreadable.
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_CONSTANTS_DATA).unwrap_or_default()
    }

    /// Parse constants from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or values of the
    /// wrong type (including negative numbers).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Effective growth ceiling.
    #[must_use]
    pub fn growth_cap(&self) -> u64 {
        self.growth_cap.unwrap_or(self.max_affordable_cost)
    }

    #[must_use]
    pub fn with_starting_currency_options(mut self, options: Vec<u64>) -> Self {
        self.starting_currency_options = options;
        self
    }

    #[must_use]
    pub const fn with_growth_rule(mut self, rule: GrowthRule) -> Self {
        self.growth_rule = rule;
        self
    }

    #[must_use]
    pub const fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    #[must_use]
    pub const fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Check every invariant the search relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("resource_a_initial_cost", self.resource_a_initial_cost),
            ("score_multiplier", self.score_multiplier),
            ("max_affordable_cost", self.max_affordable_cost),
            ("growth_cap", self.growth_cap()),
            ("max_ratio", self.max_ratio),
            ("max_turns", u64::from(self.max_turns)),
        ];
        if let Some((field, _)) = positive.into_iter().find(|&(_, value)| value == 0) {
            return Err(ConfigError::ZeroValue { field });
        }
        if self.min_score > self.max_score {
            return Err(ConfigError::ScoreWindow {
                min: self.min_score,
                max: self.max_score,
            });
        }
        if self.starting_currency_options.is_empty() {
            return Err(ConfigError::NoStartingCurrency);
        }
        let cap = self.growth_cap();
        let mut seen = BTreeSet::new();
        for &value in &self.starting_currency_options {
            if value == 0 {
                return Err(ConfigError::ZeroStartingCurrency);
            }
            if value > cap {
                return Err(ConfigError::StartingAboveCap { value, cap });
            }
            if !seen.insert(value) {
                return Err(ConfigError::DuplicateStartingCurrency { value });
            }
        }
        Ok(())
    }
}

impl Default for GameConstants {
    fn default() -> Self {
        Self {
            resource_a_initial_cost: Self::default_resource_a_initial_cost(),
            resource_a_cost_step: Self::default_resource_a_cost_step(),
            resource_b_unit_cost: Self::default_resource_b_unit_cost(),
            base_entry_cost: Self::default_base_entry_cost(),
            score_multiplier: Self::default_score_multiplier(),
            max_affordable_cost: Self::default_max_affordable_cost(),
            min_score: Self::default_min_score(),
            max_score: Self::default_max_score(),
            starting_currency_options: Self::default_starting_currency_options(),
            max_turns: Self::default_max_turns(),
            growth_cap: None,
            max_ratio: Self::default_max_ratio(),
            growth_rule: GrowthRule::default(),
            tie_break: TieBreak::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_asset_matches_defaults() {
        assert_eq!(GameConstants::load_from_static(), GameConstants::default());
        assert!(GameConstants::default().validate().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let constants = GameConstants::from_json(r#"{ "max_turns": 5 }"#).unwrap();
        assert_eq!(constants.max_turns, 5);
        assert_eq!(constants.resource_a_initial_cost, 7);
        assert_eq!(constants.growth_cap(), constants.max_affordable_cost);
        assert_eq!(constants.growth_rule, GrowthRule::Reinvest);
    }

    #[test]
    fn negative_values_fail_to_parse() {
        let err = GameConstants::from_json(r#"{ "base_entry_cost": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_fields_are_rejected() {
        let mut constants = GameConstants::default();
        constants.resource_a_initial_cost = 0;
        assert_eq!(
            constants.validate(),
            Err(ConfigError::ZeroValue {
                field: "resource_a_initial_cost"
            })
        );

        let constants = GameConstants::default().with_max_turns(0);
        assert_eq!(
            constants.validate(),
            Err(ConfigError::ZeroValue { field: "max_turns" })
        );
    }

    #[test]
    fn inverted_score_window_is_rejected() {
        let constants = GameConstants {
            min_score: 500,
            max_score: 486,
            ..GameConstants::default()
        };
        assert_eq!(
            constants.validate(),
            Err(ConfigError::ScoreWindow { min: 500, max: 486 })
        );
    }

    #[test]
    fn starting_options_are_checked() {
        let empty = GameConstants::default().with_starting_currency_options(Vec::new());
        assert_eq!(empty.validate(), Err(ConfigError::NoStartingCurrency));

        let zero = GameConstants::default().with_starting_currency_options(vec![10, 0]);
        assert_eq!(zero.validate(), Err(ConfigError::ZeroStartingCurrency));

        let dup = GameConstants::default().with_starting_currency_options(vec![10, 20, 10]);
        assert_eq!(
            dup.validate(),
            Err(ConfigError::DuplicateStartingCurrency { value: 10 })
        );

        let above = GameConstants {
            growth_cap: Some(40),
            ..GameConstants::default()
        }
        .with_starting_currency_options(vec![50]);
        assert_eq!(
            above.validate(),
            Err(ConfigError::StartingAboveCap { value: 50, cap: 40 })
        );
    }

    #[test]
    fn policy_names_round_trip_through_strings() {
        assert_eq!("Doubling".parse::<GrowthRule>(), Ok(GrowthRule::Doubling));
        assert_eq!(GrowthRule::Reinvest.to_string(), "reinvest");
        assert_eq!("lowest_cost".parse::<TieBreak>(), Ok(TieBreak::LowestCost));
        assert!("cheapest".parse::<TieBreak>().is_err());
    }
}
