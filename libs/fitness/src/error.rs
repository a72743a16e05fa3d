//! Error types for the metrics crate

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while interpreting fitness records or metric settings
///
/// Undefined metrics (a BMI without a height, say) are not errors; those are
/// reported as `None` by the computations themselves.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// Meal type outside Breakfast/Lunch/Dinner/Snack
    #[error("Unknown meal type: {0}")]
    UnknownMealType(String),

    /// Goal type outside weight_loss/muscle_gain/maintenance
    #[error("Unknown goal type: {0}")]
    UnknownGoalType(String),

    /// Activity level outside the known multiplier table
    #[error("Unknown activity level: {0}")]
    UnknownActivityLevel(String),

    /// Gender that is neither male, female nor other
    #[error("Unknown gender: {0}")]
    UnknownGender(String),

    /// Local midnight does not exist for the requested day
    #[error("Day {0} has no valid start in the requested time zone")]
    InvalidDay(NaiveDate),

    /// Metric settings that cannot produce sensible targets
    #[error("Invalid metrics configuration: {0}")]
    InvalidConfig(String),
}

/// Type alias for Result with MetricsError
pub type MetricsResult<T> = Result<T, MetricsError>;
