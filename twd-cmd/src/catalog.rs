//! Listings of the fixed configuration tables: cost tiers and standards.

use std::fmt::Write as _;
use twd_core::cost::CostTier;
use twd_core::standards::Standards;
use twd_utils::format::thousands;

use crate::estimate::load_standards;
use crate::render::write_output;
use crate::OutputFormat;

/// Run the `tiers` command.
pub fn run_tiers(format: OutputFormat) -> anyhow::Result<()> {
    write_output(None, &tiers(format)?)
}

/// Run the `standards` command.
pub fn run_standards(path: Option<&str>, format: OutputFormat) -> anyhow::Result<()> {
    let standards = load_standards(path)?;
    write_output(None, &standards_listing(&standards, format)?)
}

pub fn tiers(format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => {
            let mut out = String::new();
            let _ = writeln!(out, "{:<8}{:<42}{:>14}", "Key", "Tier", "Price per m3");
            for tier in CostTier::ALL {
                let _ = writeln!(
                    out,
                    "{:<8}{:<42}{:>14}",
                    key(tier),
                    tier.label(),
                    thousands(tier.price_per_cubic_meter())
                );
            }
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(Vec::new());
            wtr.write_record(["key", "label", "price_per_cubic_meter"])?;
            for tier in CostTier::ALL {
                wtr.write_record([
                    key(tier).to_string(),
                    tier.label().to_string(),
                    tier.price_per_cubic_meter().to_string(),
                ])?;
            }
            finish_csv(wtr)
        }
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = CostTier::ALL
                .into_iter()
                .map(|tier| {
                    serde_json::json!({
                        "key": tier,
                        "label": tier.label(),
                        "price_per_cubic_meter": tier.price_per_cubic_meter(),
                    })
                })
                .collect();
            Ok(serde_json::to_string_pretty(&rows)? + "\n")
        }
    }
}

pub fn standards_listing(standards: &Standards, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => {
            let mut out = String::new();
            let _ = writeln!(out, "{:<26}{:>10}  Unit", "Key", "Value");
            for (key, value, unit) in standards.entries() {
                let _ = writeln!(out, "{:<26}{:>10}  {}", key, value, unit);
            }
            Ok(out)
        }
        // same layout as the standards fixture, so the output can be edited and fed back
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(Vec::new());
            wtr.write_record(["key", "value", "unit"])?;
            for (key, value, unit) in standards.entries() {
                wtr.write_record([key.to_string(), value.to_string(), unit.to_string()])?;
            }
            finish_csv(wtr)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(standards)? + "\n"),
    }
}

fn key(tier: CostTier) -> &'static str {
    match tier {
        CostTier::Low => "low",
        CostTier::Medium => "medium",
        CostTier::High => "high",
    }
}

fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> anyhow::Result<String> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_table() {
        let table = tiers(OutputFormat::Table).unwrap();
        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("Medium (Hilly, limited access)"));
        assert!(table.contains("45,000"));
    }

    #[test]
    fn test_tiers_json_keys_parse_back() {
        let json = tiers(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["key"], "low");
        assert_eq!(value[2]["price_per_cubic_meter"], 45000.0);
        assert_eq!("high".parse::<CostTier>().unwrap(), CostTier::High);
    }

    #[test]
    fn test_standards_csv_parses_back() {
        let csv_data = standards_listing(&Standards::BUILT_IN, OutputFormat::Csv).unwrap();
        assert_eq!(
            Standards::parse_standards_csv(&csv_data).unwrap(),
            Standards::BUILT_IN
        );
    }

    #[test]
    fn test_standards_table() {
        let table = standards_listing(&Standards::BUILT_IN, OutputFormat::Table).unwrap();
        assert!(table.contains("livestock_poultry"));
        assert!(table.contains("0.6"));
        assert_eq!(table.lines().count(), 13);
    }
}
