//! The `estimate` command: build a request, run the estimator, render.

use anyhow::Context;
use log::info;
use std::path::Path;
use twd_core::cost::CostTier;
use twd_core::estimate::Estimator;
use twd_core::facility::{
    AccommodationParams, ClubParams, FacilitySelection, LandscapeParams, PoolParams,
    RestaurantParams, ZooParams,
};
use twd_core::report::Report;
use twd_core::request::EstimateRequest;
use twd_core::scenario::Scenario;
use twd_core::standards::Standards;

use crate::render;
use crate::{Facility, OutputFormat};

/// Command-line values that override the request file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub scenario: Option<Scenario>,
    pub visitors: Option<u32>,
    pub peak_multiplier: Option<f64>,
    pub staff: Option<u32>,
    pub enable: Vec<Facility>,
    pub disable: Vec<Facility>,
    pub loss_percent: Option<f64>,
    pub tier: Option<CostTier>,
    pub price: Option<f64>,
}

/// Where inputs come from and how the report goes out.
#[derive(Debug, Clone)]
pub struct EstimateOptions {
    pub input: Option<String>,
    pub standards: Option<String>,
    pub format: OutputFormat,
    pub output: Option<String>,
    pub include_loss_row: bool,
    pub currency: String,
}

impl Default for EstimateOptions {
    fn default() -> Self {
        EstimateOptions {
            input: None,
            standards: None,
            format: OutputFormat::Table,
            output: None,
            include_loss_row: true,
            currency: "Rp".to_string(),
        }
    }
}

impl Overrides {
    /// Apply the overrides on top of `request`. Enabling a facility that is
    /// already enabled keeps its parameters; disabling wins over enabling.
    pub fn apply(&self, request: &mut EstimateRequest) {
        let scenario = &mut request.scenario;
        if let Some(s) = self.scenario {
            scenario.scenario = s;
        }
        if let Some(v) = self.visitors {
            scenario.base_visitors_per_day = v;
        }
        if let Some(m) = self.peak_multiplier {
            scenario.peak_multiplier = m;
        }
        if let Some(s) = self.staff {
            scenario.staff_count = s;
        }
        for facility in &self.enable {
            set_enabled(&mut request.facilities, *facility, true);
        }
        for facility in &self.disable {
            set_enabled(&mut request.facilities, *facility, false);
        }
        if let Some(loss) = self.loss_percent {
            request.loss_percent = loss;
        }
        if let Some(tier) = self.tier {
            request.cost_tier = tier;
        }
        if self.price.is_some() {
            request.price_per_cubic_meter = self.price;
        }
    }
}

fn set_enabled(selection: &mut FacilitySelection, facility: Facility, enabled: bool) {
    fn toggle<T: Default>(slot: &mut Option<T>, enabled: bool) {
        if !enabled {
            *slot = None;
        } else if slot.is_none() {
            *slot = Some(T::default());
        }
    }
    match facility {
        Facility::Restaurant => toggle::<RestaurantParams>(&mut selection.restaurant, enabled),
        Facility::Club => toggle::<ClubParams>(&mut selection.club, enabled),
        Facility::Accommodation => {
            toggle::<AccommodationParams>(&mut selection.accommodation, enabled)
        }
        Facility::Pool => toggle::<PoolParams>(&mut selection.pool, enabled),
        Facility::Zoo => toggle::<ZooParams>(&mut selection.zoo, enabled),
        Facility::Landscape => toggle::<LandscapeParams>(&mut selection.landscape, enabled),
    }
}

/// Read the request file, or start from defaults.
pub fn load_request(input: Option<&str>) -> anyhow::Result<EstimateRequest> {
    match input {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read request file {path}"))?;
            let request = EstimateRequest::from_json(&json)
                .with_context(|| format!("Invalid request file {path}"))?;
            info!("Loaded request from {}", path);
            Ok(request)
        }
        None => Ok(EstimateRequest::default()),
    }
}

/// Read a standards override table, or use the built-in one.
pub fn load_standards(path: Option<&str>) -> anyhow::Result<Standards> {
    match path {
        Some(path) => {
            let csv_data = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read standards file {path}"))?;
            let standards = Standards::parse_standards_csv(&csv_data)
                .with_context(|| format!("Invalid standards file {path}"))?;
            info!("Loaded standards from {}", path);
            Ok(standards)
        }
        None => Ok(Standards::BUILT_IN),
    }
}

/// Build the report for a request without writing it anywhere.
pub fn build_report(
    request: &EstimateRequest,
    standards: Standards,
    include_loss_row: bool,
) -> anyhow::Result<Report> {
    let validated = request.validate().context("Invalid estimate input")?;
    info!(
        "Estimating {} scenario with {} enabled facilities",
        validated.scenario.scenario,
        validated.modules.len()
    );
    let estimate = Estimator::new(standards).compute(
        &validated.scenario,
        &validated.modules,
        validated.loss_percent,
        &validated.cost,
    );
    Ok(Report::from_estimate(
        validated.scenario.scenario,
        &estimate,
        include_loss_row,
    ))
}

/// Run the `estimate` command.
pub fn run_estimate(overrides: &Overrides, options: &EstimateOptions) -> anyhow::Result<()> {
    let mut request = load_request(options.input.as_deref())?;
    overrides.apply(&mut request);
    let standards = load_standards(options.standards.as_deref())?;
    let report = build_report(&request, standards, options.include_loss_row)?;

    let price_label = match request.price_per_cubic_meter {
        Some(_) => "custom price".to_string(),
        None => request.cost_tier.label().to_string(),
    };
    let body = match options.format {
        OutputFormat::Table => render::report_table(&report, &price_label, &options.currency),
        OutputFormat::Csv => render::report_csv(&report)?,
        OutputFormat::Json => render::report_json(&report)?,
    };
    render::write_output(options.output.as_deref().map(Path::new), &body)?;
    info!(
        "Estimate complete: {} L/day total",
        report.aggregate.total_liters
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let mut request = EstimateRequest::default();
        let overrides = Overrides {
            scenario: Some(Scenario::Peak),
            visitors: Some(1000),
            enable: vec![Facility::Pool, Facility::Zoo],
            disable: vec![Facility::Restaurant, Facility::Zoo],
            tier: Some(CostTier::High),
            price: Some(20000.0),
            ..Overrides::default()
        };
        overrides.apply(&mut request);
        assert_eq!(request.scenario.scenario, Scenario::Peak);
        assert_eq!(request.scenario.base_visitors_per_day, 1000);
        assert_eq!(request.scenario.staff_count, 60);
        assert!(request.facilities.restaurant.is_none());
        assert_eq!(request.facilities.pool, Some(PoolParams::default()));
        assert!(request.facilities.zoo.is_none());
        assert_eq!(request.cost_tier, CostTier::High);
        assert_eq!(request.price_per_cubic_meter, Some(20000.0));
    }

    #[test]
    fn test_enable_keeps_existing_params() {
        let mut request = EstimateRequest::default();
        request.facilities.landscape = Some(LandscapeParams { area_m2: 50.0 });
        let overrides = Overrides {
            enable: vec![Facility::Landscape],
            ..Overrides::default()
        };
        overrides.apply(&mut request);
        assert_eq!(request.facilities.landscape, Some(LandscapeParams { area_m2: 50.0 }));
    }

    #[test]
    fn test_build_report_rejects_bad_input() {
        let request = EstimateRequest {
            loss_percent: 250.0,
            ..EstimateRequest::default()
        };
        let err = build_report(&request, Standards::BUILT_IN, true).unwrap_err();
        assert!(format!("{err:#}").contains("loss_percent"));
    }

    #[test]
    fn test_load_request_and_standards_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let request_path = dir.path().join("request.json");
        std::fs::write(
            &request_path,
            r#"{ "scenario": { "base_visitors_per_day": 100, "staff_count": 0 },
                 "facilities": { "restaurant": null }, "loss_percent": 0 }"#,
        )
        .unwrap();
        let standards_path = dir.path().join("standards.csv");
        std::fs::write(
            &standards_path,
            twd_core::standards::STANDARDS_CSV
                .replace("visitor_sanitation,10,", "visitor_sanitation,12,"),
        )
        .unwrap();

        let request = load_request(request_path.to_str()).unwrap();
        let standards = load_standards(standards_path.to_str()).unwrap();
        let report = build_report(&request, standards, true).unwrap();
        assert_eq!(report.aggregate.total_liters, 1200.0);
        assert_eq!(report.rows[0].liters_per_day, 1200.0);
    }

    #[test]
    fn test_missing_request_file() {
        let err = load_request(Some("/nonexistent/request.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read request file"));
    }

    #[test]
    fn test_run_estimate_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.csv");
        let options = EstimateOptions {
            format: OutputFormat::Csv,
            output: Some(out.to_string_lossy().into_owned()),
            ..EstimateOptions::default()
        };
        run_estimate(&Overrides::default(), &options).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.starts_with("component,source,liters_per_day,share_percent"));
        assert!(written.contains("Water Loss Reserve"));
    }
}
