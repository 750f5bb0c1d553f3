//! The demand estimator: base load plus enabled facilities, adjusted for
//! distribution losses and priced.
//!
//! Estimation is a pure function of its inputs. Nothing is cached or
//! mutated between calls, so an [`Estimator`] can be shared freely across
//! threads.

use serde::{Deserialize, Serialize};

use crate::cost::CostModel;
use crate::demand::DemandBreakdown;
use crate::facility::{base_components, FacilityModule};
use crate::scenario::{Percent, ScenarioInput};
use crate::standards::Standards;

/// Days per billing month.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Aggregate figures derived from a breakdown.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AggregateResult {
    pub subtotal_liters: f64,
    pub loss_percent: f64,
    pub loss_liters: f64,
    /// `subtotal_liters + loss_liters`
    pub total_liters: f64,
    pub daily_cost: f64,
    pub monthly_cost: f64,
}

impl AggregateResult {
    pub fn daily_cubic_meters(&self) -> f64 {
        self.total_liters / 1000.0
    }

    pub fn monthly_liters(&self) -> f64 {
        self.total_liters * DAYS_PER_MONTH
    }

    pub fn monthly_cubic_meters(&self) -> f64 {
        self.monthly_liters() / 1000.0
    }

    /// Share of the final total taken by `liters`, or `None` when the total is zero.
    pub fn share_of_total(&self, liters: f64) -> Option<f64> {
        if self.total_liters > 0.0 {
            Some(liters / self.total_liters * 100.0)
        } else {
            None
        }
    }
}

/// Result of one estimation.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Estimate {
    pub effective_visitors: u64,
    pub price_per_cubic_meter: f64,
    /// Measured demand sources only; the loss reserve lives in `aggregate`
    pub breakdown: DemandBreakdown,
    pub aggregate: AggregateResult,
}

/// Demand estimator bound to a standards table.
#[derive(Debug, Default, Clone, Copy)]
pub struct Estimator {
    standards: Standards,
}

impl Estimator {
    pub fn new(standards: Standards) -> Self {
        Estimator { standards }
    }

    pub fn standards(&self) -> &Standards {
        &self.standards
    }

    /// Estimate daily demand and cost.
    ///
    /// Inputs are expected to have passed validation (see
    /// [`crate::request::EstimateRequest::validate`]); the computation
    /// itself cannot fail.
    pub fn compute(
        &self,
        input: &ScenarioInput,
        modules: &[FacilityModule],
        loss_percent: Percent,
        cost: &CostModel,
    ) -> Estimate {
        let effective_visitors = input.effective_visitors();
        let mut breakdown = DemandBreakdown(base_components(input, &self.standards));
        for module in modules {
            breakdown.extend(module.components(effective_visitors, &self.standards));
        }

        let subtotal_liters = breakdown.subtotal();
        let loss_liters = loss_percent.of(subtotal_liters);
        let total_liters = subtotal_liters + loss_liters;
        let daily_cost = cost.cost_of(total_liters);
        let aggregate = AggregateResult {
            subtotal_liters,
            loss_percent: loss_percent.value(),
            loss_liters,
            total_liters,
            daily_cost,
            monthly_cost: daily_cost * DAYS_PER_MONTH,
        };
        log::debug!(
            "[TWD Debug] estimate: {} components from {} modules, total {} L/day",
            breakdown.len(),
            modules.len(),
            total_liters
        );
        Estimate {
            effective_visitors,
            price_per_cubic_meter: cost.price_per_cubic_meter(),
            breakdown,
            aggregate,
        }
    }
}

/// Estimate with the built-in standards table.
pub fn compute(
    input: &ScenarioInput,
    modules: &[FacilityModule],
    loss_percent: Percent,
    cost: &CostModel,
) -> (DemandBreakdown, AggregateResult) {
    let estimate = Estimator::default().compute(input, modules, loss_percent, cost);
    (estimate.breakdown, estimate.aggregate)
}
