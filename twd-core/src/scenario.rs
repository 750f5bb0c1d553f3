use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{check_non_negative, DemandError, Result};

/// Operational scenario: an ordinary weekday or a peak day (weekend/holiday).
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    #[default]
    Normal,
    Peak,
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::Normal => write!(f, "Normal (Weekday)"),
            Scenario::Peak => write!(f, "Peak (Weekend/Holiday)"),
        }
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "weekday" => Ok(Scenario::Normal),
            "peak" | "weekend" | "holiday" => Ok(Scenario::Peak),
            other => Err(format!("unknown scenario '{other}' (expected normal or peak)")),
        }
    }
}

/// A percentage validated to lie in `0..=100`.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percent(pub(crate) f64);

impl Percent {
    pub const ZERO: Percent = Percent(0.0);

    pub fn new(value: f64) -> Result<Self> {
        Self::checked("percent", value)
    }

    /// Like [`Percent::new`], naming the offending field in the error.
    pub fn checked(field: &'static str, value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(DemandError::NonFinite { field });
        }
        if !(0.0..=100.0).contains(&value) {
            return Err(DemandError::PercentOutOfRange { field, value });
        }
        Ok(Percent(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// `amount * percent / 100`
    pub fn of(self, amount: f64) -> f64 {
        amount * self.0 / 100.0
    }
}

impl TryFrom<f64> for Percent {
    type Error = DemandError;

    fn try_from(value: f64) -> Result<Self> {
        Percent::new(value)
    }
}

impl From<Percent> for f64 {
    fn from(p: Percent) -> f64 {
        p.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Base occupancy of the destination.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioInput {
    /// Visitors on an ordinary day
    pub base_visitors_per_day: u32,
    /// Applied to the base visitor count on peak days; at least 1.0
    pub peak_multiplier: f64,
    pub scenario: Scenario,
    /// Non-kitchen staff (tickets, cleaning, security)
    pub staff_count: u32,
}

impl Default for ScenarioInput {
    fn default() -> Self {
        ScenarioInput {
            base_visitors_per_day: 750,
            peak_multiplier: 2.0,
            scenario: Scenario::Normal,
            staff_count: 60,
        }
    }
}

impl ScenarioInput {
    pub fn validate(&self) -> Result<()> {
        check_non_negative("peak_multiplier", self.peak_multiplier)?;
        if self.peak_multiplier < 1.0 {
            return Err(DemandError::InvalidMultiplier(self.peak_multiplier));
        }
        Ok(())
    }

    /// Visitor count used for calculation, truncated to a whole person.
    pub fn effective_visitors(&self) -> u64 {
        match self.scenario {
            Scenario::Normal => u64::from(self.base_visitors_per_day),
            Scenario::Peak => (f64::from(self.base_visitors_per_day) * self.peak_multiplier) as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_visitors() {
        let mut input = ScenarioInput {
            base_visitors_per_day: 750,
            peak_multiplier: 2.0,
            scenario: Scenario::Normal,
            staff_count: 0,
        };
        assert_eq!(input.effective_visitors(), 750);
        input.scenario = Scenario::Peak;
        assert_eq!(input.effective_visitors(), 1500);
        // truncated, not rounded
        input.peak_multiplier = 1.33;
        assert_eq!(input.effective_visitors(), 997);
    }

    #[test]
    fn test_multiplier_ignored_on_normal_days() {
        let input = ScenarioInput {
            base_visitors_per_day: 100,
            peak_multiplier: 5.0,
            scenario: Scenario::Normal,
            staff_count: 0,
        };
        assert_eq!(input.effective_visitors(), 100);
    }

    #[test]
    fn test_validate_multiplier() {
        let mut input = ScenarioInput::default();
        assert!(input.validate().is_ok());
        input.peak_multiplier = 0.5;
        assert!(matches!(input.validate(), Err(DemandError::InvalidMultiplier(_))));
        input.peak_multiplier = f64::INFINITY;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_percent_bounds() {
        assert!(Percent::new(0.0).is_ok());
        assert!(Percent::new(100.0).is_ok());
        assert!(Percent::new(-1.0).is_err());
        assert!(Percent::new(100.5).is_err());
        assert!(Percent::new(f64::NAN).is_err());
        assert_eq!(Percent::new(80.0).unwrap().of(1000.0), 800.0);
    }

    #[test]
    fn test_percent_deserialize_rejects_out_of_range() {
        let ok: Percent = serde_json::from_str("20").unwrap();
        assert_eq!(ok.value(), 20.0);
        assert!(serde_json::from_str::<Percent>("150").is_err());
    }

    #[test]
    fn test_scenario_from_str() {
        assert_eq!("peak".parse::<Scenario>().unwrap(), Scenario::Peak);
        assert_eq!("Normal".parse::<Scenario>().unwrap(), Scenario::Normal);
        assert!("rush".parse::<Scenario>().is_err());
    }

    #[test]
    fn test_scenario_input_partial_json() {
        let input: ScenarioInput =
            serde_json::from_str(r#"{"scenario": "peak", "staff_count": 10}"#).unwrap();
        assert_eq!(input.scenario, Scenario::Peak);
        assert_eq!(input.staff_count, 10);
        assert_eq!(input.base_visitors_per_day, 750);
    }
}
