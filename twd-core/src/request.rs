use serde::{Deserialize, Serialize};

use crate::cost::{CostModel, CostTier};
use crate::error::Result;
use crate::facility::{FacilityModule, FacilitySelection};
use crate::scenario::{Percent, ScenarioInput};

/// Default distribution-loss allowance.
pub const DEFAULT_LOSS_PERCENT: f64 = 20.0;

/// A complete estimation request, as read from a JSON file.
///
/// Every field is optional; missing fields take the defaults of the
/// corresponding types.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateRequest {
    pub scenario: ScenarioInput,
    pub facilities: FacilitySelection,
    pub loss_percent: f64,
    pub cost_tier: CostTier,
    /// Overrides the tier price when set
    pub price_per_cubic_meter: Option<f64>,
}

impl Default for EstimateRequest {
    fn default() -> Self {
        EstimateRequest {
            scenario: ScenarioInput::default(),
            facilities: FacilitySelection::default(),
            loss_percent: DEFAULT_LOSS_PERCENT,
            cost_tier: CostTier::default(),
            price_per_cubic_meter: None,
        }
    }
}

/// Inputs that passed validation, ready for the estimator.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub scenario: ScenarioInput,
    pub modules: Vec<FacilityModule>,
    pub loss_percent: Percent,
    pub cost: CostModel,
}

impl EstimateRequest {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn cost_model(&self) -> Result<CostModel> {
        match self.price_per_cubic_meter {
            Some(price) => CostModel::new(price),
            None => Ok(CostModel::from(self.cost_tier)),
        }
    }

    /// Check every input and split the request into estimator arguments.
    pub fn validate(&self) -> Result<ValidatedRequest> {
        self.scenario.validate()?;
        let modules = self.facilities.enabled_modules();
        for module in &modules {
            module.validate()?;
        }
        let loss_percent = Percent::checked("loss_percent", self.loss_percent)?;
        let cost = self.cost_model()?;
        log::debug!(
            "[TWD Debug] request: validated {} enabled modules",
            modules.len()
        );
        Ok(ValidatedRequest {
            scenario: self.scenario.clone(),
            modules,
            loss_percent,
            cost,
        })
    }
}
