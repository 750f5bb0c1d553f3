use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DemandError, Result};

/// Water supply risk of the site, which fixes the price of water.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostTier {
    Low,
    #[default]
    Medium,
    High,
}

impl CostTier {
    pub const ALL: [CostTier; 3] = [CostTier::Low, CostTier::Medium, CostTier::High];

    pub fn label(self) -> &'static str {
        match self {
            CostTier::Low => "Low (Urban, reliable utility)",
            CostTier::Medium => "Medium (Hilly, limited access)",
            CostTier::High => "High (Drought-prone, tanker-dependent)",
        }
    }

    /// Currency units per cubic meter (1,000 L).
    pub fn price_per_cubic_meter(self) -> f64 {
        match self {
            CostTier::Low => 7500.0,
            CostTier::Medium => 15000.0,
            CostTier::High => 45000.0,
        }
    }

    /// Look a tier up by its full display label.
    pub fn from_label(label: &str) -> Result<CostTier> {
        CostTier::ALL
            .into_iter()
            .find(|tier| tier.label() == label)
            .ok_or_else(|| DemandError::UnknownCostTier(label.to_string()))
    }
}

impl fmt::Display for CostTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for CostTier {
    type Err = DemandError;

    /// Accepts the short key (`low`, `medium`, `high`) or the full label.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(CostTier::Low),
            "medium" => Ok(CostTier::Medium),
            "high" => Ok(CostTier::High),
            _ => CostTier::from_label(s.trim()),
        }
    }
}

/// Unit price of water used to turn volume into cost.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct CostModel {
    price_per_cubic_meter: f64,
}

impl CostModel {
    pub fn new(price_per_cubic_meter: f64) -> Result<Self> {
        if !price_per_cubic_meter.is_finite() || price_per_cubic_meter <= 0.0 {
            return Err(DemandError::NonPositivePrice(price_per_cubic_meter));
        }
        Ok(CostModel {
            price_per_cubic_meter,
        })
    }

    pub fn price_per_cubic_meter(&self) -> f64 {
        self.price_per_cubic_meter
    }

    /// Cost of `liters` of water.
    pub fn cost_of(&self, liters: f64) -> f64 {
        (liters / 1000.0) * self.price_per_cubic_meter
    }
}

impl From<CostTier> for CostModel {
    fn from(tier: CostTier) -> Self {
        CostModel {
            price_per_cubic_meter: tier.price_per_cubic_meter(),
        }
    }
}
