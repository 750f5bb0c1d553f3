/// Error types for the demand engine
use thiserror::Error;

/// Main error type for input validation and configuration loading.
///
/// The estimator itself never fails; every variant here is raised at the
/// input boundary before a computation starts.
#[derive(Error, Debug)]
pub enum DemandError {
    /// A count, area or volume was below zero
    #[error("{field} must not be negative")]
    NegativeValue { field: &'static str },

    /// A percentage outside 0..=100
    #[error("{field} must be between 0 and 100 (got {value})")]
    PercentOutOfRange { field: &'static str, value: f64 },

    /// Peak multiplier below 1.0
    #[error("Peak multiplier must be at least 1.0 (got {0})")]
    InvalidMultiplier(f64),

    /// Water price of zero or less
    #[error("Price per cubic meter must be positive (got {0})")]
    NonPositivePrice(f64),

    /// NaN or infinity in a numeric input
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    /// No cost tier with this label or key
    #[error("Unknown cost tier: {0}")]
    UnknownCostTier(String),

    /// Malformed standards table
    #[error("Invalid standards table: {0}")]
    Standards(String),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),
}

/// Type alias for Results using DemandError
pub type Result<T> = std::result::Result<T, DemandError>;

/// Reject NaN/infinite and negative values.
pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(DemandError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(DemandError::NegativeValue { field });
    }
    Ok(())
}
