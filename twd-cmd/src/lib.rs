//! Command implementations for TWD CLI.
//!
//! Provides subcommands for estimating destination water demand and for
//! listing the cost tiers and consumption standards the estimate uses.

use clap::{Subcommand, ValueEnum};
use twd_core::cost::CostTier;
use twd_core::scenario::Scenario;

pub mod catalog;
pub mod estimate;
pub mod render;

/// Output rendering for reports and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Facility modules that can be switched on or off from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Facility {
    Restaurant,
    Club,
    Accommodation,
    Pool,
    Zoo,
    Landscape,
}

#[derive(Subcommand)]
pub enum Command {
    /// Estimate daily and monthly water demand and cost
    Estimate {
        /// JSON request file; flags below override its values
        #[arg(short = 'i', long)]
        input: Option<String>,

        /// Operational scenario (normal or peak)
        #[arg(long)]
        scenario: Option<Scenario>,

        /// Visitors per ordinary day
        #[arg(long)]
        visitors: Option<u32>,

        /// Visitor multiplier applied on peak days (>= 1.0)
        #[arg(long)]
        peak_multiplier: Option<f64>,

        /// Operational (non-kitchen) staff
        #[arg(long)]
        staff: Option<u32>,

        /// Enable a facility with its default parameters (repeatable)
        #[arg(long, value_enum)]
        enable: Vec<Facility>,

        /// Disable a facility (repeatable)
        #[arg(long, value_enum)]
        disable: Vec<Facility>,

        /// Distribution loss allowance in percent (0-100)
        #[arg(long)]
        loss_percent: Option<f64>,

        /// Water cost tier: low, medium, high
        #[arg(long)]
        tier: Option<CostTier>,

        /// Price per cubic meter, overriding the tier price
        #[arg(long)]
        price: Option<f64>,

        /// CSV file with replacement consumption standards (key,value,unit)
        #[arg(long)]
        standards: Option<String>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write the report here instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Leave the water loss reserve out of the component rows
        #[arg(long)]
        no_loss_row: bool,

        /// Currency symbol for cost figures in table output
        #[arg(long, default_value = "Rp")]
        currency: String,
    },

    /// List the water cost tiers
    Tiers {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show the consumption standards table
    Standards {
        /// CSV file with replacement standards to validate and show
        #[arg(long)]
        standards: Option<String>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Estimate {
            input,
            scenario,
            visitors,
            peak_multiplier,
            staff,
            enable,
            disable,
            loss_percent,
            tier,
            price,
            standards,
            format,
            output,
            no_loss_row,
            currency,
        } => {
            let overrides = estimate::Overrides {
                scenario,
                visitors,
                peak_multiplier,
                staff,
                enable,
                disable,
                loss_percent,
                tier,
                price,
            };
            let options = estimate::EstimateOptions {
                input,
                standards,
                format,
                output,
                include_loss_row: !no_loss_row,
                currency,
            };
            estimate::run_estimate(&overrides, &options)
        }
        Command::Tiers { format } => catalog::run_tiers(format),
        Command::Standards { standards, format } => {
            catalog::run_standards(standards.as_deref(), format)
        }
    }
}
