//! Display rows for an estimate.
//!
//! Rows are sorted by descending volume and annotated with their share of
//! the final total. All structs derive `Serialize` so a report can be
//! exported as JSON as-is.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::cmp::Ordering;

use crate::demand::ComponentSource;
use crate::estimate::{AggregateResult, Estimate};
use crate::scenario::Scenario;

/// Label of the loss reserve row.
pub const LOSS_RESERVE_LABEL: &str = "Water Loss Reserve";

/// A single row of the breakdown table / bar chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportRow {
    pub label: String,
    pub source: ComponentSource,
    pub liters_per_day: f64,
    /// Share of the final total, `None` when the total is zero.
    pub share_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Local>,
    pub scenario: Scenario,
    pub effective_visitors: u64,
    pub price_per_cubic_meter: f64,
    pub aggregate: AggregateResult,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Build display rows from an estimate.
    ///
    /// With `include_loss_reserve`, a [`LOSS_RESERVE_LABEL`] row is added
    /// when the loss volume is above zero.
    pub fn from_estimate(scenario: Scenario, estimate: &Estimate, include_loss_reserve: bool) -> Self {
        let aggregate = &estimate.aggregate;
        let mut rows: Vec<ReportRow> = estimate
            .breakdown
            .components()
            .iter()
            .map(|c| ReportRow {
                label: c.label.clone(),
                source: c.source,
                liters_per_day: c.liters_per_day,
                share_percent: aggregate.share_of_total(c.liters_per_day),
            })
            .collect();
        if include_loss_reserve && aggregate.loss_liters > 0.0 {
            rows.push(ReportRow {
                label: LOSS_RESERVE_LABEL.to_string(),
                source: ComponentSource::LossReserve,
                liters_per_day: aggregate.loss_liters,
                share_percent: aggregate.share_of_total(aggregate.loss_liters),
            });
        }
        // stable sort keeps production order for ties
        rows.sort_by(|a, b| {
            b.liters_per_day
                .partial_cmp(&a.liters_per_day)
                .unwrap_or(Ordering::Equal)
        });
        Report {
            generated_at: Local::now(),
            scenario,
            effective_visitors: estimate.effective_visitors,
            price_per_cubic_meter: estimate.price_per_cubic_meter,
            aggregate: aggregate.clone(),
            rows,
        }
    }

    /// True when no component carries any volume.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.liters_per_day == 0.0)
    }

    /// Largest row volume, used to scale bar charts.
    pub fn max_liters(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| r.liters_per_day)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{CostModel, CostTier};
    use crate::estimate::Estimator;
    use crate::facility::FacilitySelection;
    use crate::scenario::{Percent, ScenarioInput};

    fn estimate(input: &ScenarioInput, selection: &FacilitySelection, loss: f64) -> Estimate {
        Estimator::default().compute(
            input,
            &selection.enabled_modules(),
            Percent::new(loss).unwrap(),
            &CostModel::from(CostTier::Medium),
        )
    }

    #[test]
    fn test_rows_sorted_descending() {
        let input = ScenarioInput::default();
        let report = Report::from_estimate(
            input.scenario,
            &estimate(&input, &FacilitySelection::all(), 20.0),
            true,
        );
        assert!(report
            .rows
            .windows(2)
            .all(|w| w[0].liters_per_day >= w[1].liters_per_day));
        assert_eq!(report.max_liters(), report.rows[0].liters_per_day);
    }

    #[test]
    fn test_loss_row_and_shares() {
        let input = ScenarioInput::default();
        let report = Report::from_estimate(
            input.scenario,
            &estimate(&input, &FacilitySelection::default(), 20.0),
            true,
        );
        let loss_row = report
            .rows
            .iter()
            .find(|r| r.source == ComponentSource::LossReserve)
            .unwrap();
        assert_eq!(loss_row.label, LOSS_RESERVE_LABEL);
        assert_eq!(loss_row.liters_per_day, report.aggregate.loss_liters);
        let share_sum: f64 = report.rows.iter().filter_map(|r| r.share_percent).sum();
        assert!((share_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_loss_row_omitted() {
        let input = ScenarioInput::default();
        let with_loss = estimate(&input, &FacilitySelection::default(), 20.0);
        let report = Report::from_estimate(input.scenario, &with_loss, false);
        assert_eq!(report.rows.len(), with_loss.breakdown.len());

        let no_loss = estimate(&input, &FacilitySelection::default(), 0.0);
        let report = Report::from_estimate(input.scenario, &no_loss, true);
        assert!(report.rows.iter().all(|r| r.label != LOSS_RESERVE_LABEL));
    }

    #[test]
    fn test_zero_total_reports_no_shares() {
        let input = ScenarioInput {
            base_visitors_per_day: 0,
            staff_count: 0,
            ..ScenarioInput::default()
        };
        let report = Report::from_estimate(
            input.scenario,
            &estimate(&input, &FacilitySelection::none(), 20.0),
            true,
        );
        assert!(report.is_empty());
        assert!(report.rows.iter().all(|r| r.share_percent.is_none()));
        assert_eq!(report.max_liters(), 0.0);
    }

    #[test]
    fn test_report_serializes() {
        let input = ScenarioInput::default();
        let report = Report::from_estimate(
            input.scenario,
            &estimate(&input, &FacilitySelection::default(), 20.0),
            true,
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["scenario"], "normal");
        assert_eq!(json["aggregate"]["loss_percent"], 20.0);
        assert!(json["rows"].as_array().unwrap().len() >= 5);
    }
}
