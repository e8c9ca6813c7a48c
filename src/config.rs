//! Labor rule configuration.
//!
//! Every cap the eligibility rules enforce lives here. `RuleSet::default()`
//! is the standard rule book; a TOML file may override any subset of fields.
//!
//! ```toml
//! max_shifts_per_week = 4
//! weekend_priority_tiers = 3
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Caps and rest periods applied by the eligibility rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Horizon cap for core staff whose record carries no shift count.
    pub default_max_shifts: u32,
    /// Calendar days that must separate an overnight from the next slot.
    pub overnight_rest_days: i64,
    /// Calendar days that must separate any two slots.
    pub min_rest_days: i64,
    /// Longest allowed run of consecutive working days.
    pub max_consecutive_days: usize,
    /// Cap per week-of-month bucket.
    pub max_shifts_per_week: usize,
    /// Cap per paycheck period.
    pub max_shifts_per_paycheck: usize,
    /// Overnight cap per paycheck period.
    pub max_overnights_per_paycheck: usize,
    /// Weekend cap per calendar month.
    pub max_weekend_shifts_per_month: usize,
    /// Number of weekend priority tiers tried before a weekend slot is left
    /// unfilled (tier `n` holds staff with exactly `n` weekend slots).
    pub weekend_priority_tiers: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            default_max_shifts: 12,
            overnight_rest_days: 2,
            min_rest_days: 1,
            max_consecutive_days: 3,
            max_shifts_per_week: 3,
            max_shifts_per_paycheck: 6,
            max_overnights_per_paycheck: 2,
            max_weekend_shifts_per_month: 2,
            weekend_priority_tiers: 2,
        }
    }
}

impl RuleSet {
    /// Parses a rule set from TOML. Missing fields keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Loads a rule set from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Sets the fallback horizon cap.
    pub fn with_default_max_shifts(mut self, max: u32) -> Self {
        self.default_max_shifts = max;
        self
    }

    /// Sets the weekly cap.
    pub fn with_max_shifts_per_week(mut self, max: usize) -> Self {
        self.max_shifts_per_week = max;
        self
    }

    /// Sets the paycheck-period cap.
    pub fn with_max_shifts_per_paycheck(mut self, max: usize) -> Self {
        self.max_shifts_per_paycheck = max;
        self
    }

    /// Sets the number of weekend priority tiers.
    pub fn with_weekend_priority_tiers(mut self, tiers: u32) -> Self {
        self.weekend_priority_tiers = tiers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;

    #[test]
    fn test_defaults() {
        let rules = RuleSet::default();
        assert_eq!(rules.default_max_shifts, 12);
        assert_eq!(rules.overnight_rest_days, 2);
        assert_eq!(rules.min_rest_days, 1);
        assert_eq!(rules.max_consecutive_days, 3);
        assert_eq!(rules.max_shifts_per_week, 3);
        assert_eq!(rules.max_shifts_per_paycheck, 6);
        assert_eq!(rules.max_overnights_per_paycheck, 2);
        assert_eq!(rules.max_weekend_shifts_per_month, 2);
        assert_eq!(rules.weekend_priority_tiers, 2);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let rules = RuleSet::from_toml_str("max_shifts_per_week = 4\n").unwrap();
        assert_eq!(rules.max_shifts_per_week, 4);
        assert_eq!(rules.max_shifts_per_paycheck, 6);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(RuleSet::from_toml_str("").unwrap(), RuleSet::default());
    }

    #[test]
    fn test_bad_toml() {
        let err = RuleSet::from_toml_str("max_shifts_per_week = \"many\"").unwrap_err();
        assert!(matches!(err, ScheduleError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RuleSet::load("/nonexistent/rules.toml").unwrap_err();
        assert!(matches!(err, ScheduleError::Io(_)));
    }

    #[test]
    fn test_builders() {
        let rules = RuleSet::default()
            .with_default_max_shifts(8)
            .with_max_shifts_per_week(2)
            .with_max_shifts_per_paycheck(4)
            .with_weekend_priority_tiers(1);
        assert_eq!(rules.default_max_shifts, 8);
        assert_eq!(rules.max_shifts_per_week, 2);
        assert_eq!(rules.max_shifts_per_paycheck, 4);
        assert_eq!(rules.weekend_priority_tiers, 1);
    }
}
