//! Rendering of reports to text table, CSV and JSON.

use std::fmt::Write as _;
use std::path::Path;
use twd_core::report::Report;
use twd_utils::format::{bar, currency, share, thousands, with_separators};

/// Width of the bar column in table output.
const BAR_WIDTH: usize = 30;

/// Render a report as a plain-text dashboard.
pub fn report_table(report: &Report, price_label: &str, currency_symbol: &str) -> String {
    let a = &report.aggregate;
    let mut out = String::new();
    let _ = writeln!(out, "Water Demand Estimate: {} scenario", report.scenario);
    let _ = writeln!(out, "Effective visitors: {}", thousands(report.effective_visitors as f64));
    let _ = writeln!(out);

    let _ = writeln!(out, "Total water demand");
    let _ = writeln!(out, "  {:<22}{:>20}", "Liters / day", thousands(a.total_liters));
    let _ = writeln!(out, "  {:<22}{:>20}", "Cubic meters / day", with_separators(a.daily_cubic_meters(), 2));
    let _ = writeln!(out, "  {:<22}{:>20}", "Liters / month", thousands(a.monthly_liters()));
    let _ = writeln!(out, "  {:<22}{:>20}", "Cubic meters / month", with_separators(a.monthly_cubic_meters(), 2));
    let _ = writeln!(out);

    let _ = writeln!(out, "Water cost");
    let _ = writeln!(out, "  {:<22}{:>20}", "Daily cost", currency(a.daily_cost, currency_symbol));
    let _ = writeln!(out, "  {:<22}{:>20}", "Monthly cost", currency(a.monthly_cost, currency_symbol));
    let _ = writeln!(
        out,
        "  Price per m3 (1,000 L) for '{}': {}",
        price_label,
        currency(report.price_per_cubic_meter, currency_symbol)
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Demand components");
    if report.is_empty() {
        let _ = writeln!(
            out,
            "  No water demand. Enable facilities or enter visitors and staff to see the breakdown."
        );
    } else {
        let label_width = report
            .rows
            .iter()
            .map(|r| r.label.len())
            .max()
            .unwrap_or(0)
            .max("Component".len());
        let max = report.max_liters();
        let _ = writeln!(
            out,
            "  {:<label_width$}  {:>14}  {:>7}  Distribution",
            "Component", "L/day", "Share"
        );
        for row in &report.rows {
            let _ = writeln!(
                out,
                "  {:<label_width$}  {:>14}  {:>7}  {}",
                row.label,
                format!("{} L", thousands(row.liters_per_day)),
                share(row.share_percent),
                bar(row.liters_per_day, max, BAR_WIDTH)
            );
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "  Subtotal demand: {} L", thousands(a.subtotal_liters));
    let _ = writeln!(
        out,
        "  Water loss reserve ({}%): {} L",
        a.loss_percent,
        thousands(a.loss_liters)
    );
    let _ = writeln!(out, "  Final total demand: {} L", thousands(a.total_liters));
    out
}

/// Render the component rows as CSV, with headers.
///
/// Columns: `component,source,liters_per_day,share_percent`. The share is
/// empty when the total is zero.
pub fn report_csv(report: &Report) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["component", "source", "liters_per_day", "share_percent"])?;
    for row in &report.rows {
        wtr.write_record([
            row.label.clone(),
            row.source.to_string(),
            format!("{:.2}", row.liters_per_day),
            row.share_percent.map_or(String::new(), |p| format!("{:.2}", p)),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

/// Render the whole report as pretty-printed JSON.
pub fn report_json(report: &Report) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

/// Write to the given file, or to stdout when there is none.
pub fn write_output(output: Option<&Path>, body: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, body)?;
            log::info!("Output written to {}", path.display());
        }
        None => print!("{body}"),
    }
    Ok(())
}
