/// Error types for the water-quality core
use thiserror::Error;

/// Main error type for water-quality operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QualityError {
    /// Date text is not a calendar date in dd/mm/yy form
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Reading value is not a finite number
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Series has no readings to read from
    #[error("Series '{0}' is empty")]
    Empty(String),

    /// Series has no readings to evaluate
    #[error("No data available for '{0}'")]
    NoData(String),

    /// Too few readings to fit a regression
    #[error("Insufficient data for regression (needed: {required}, found: {actual})")]
    InsufficientData { required: usize, actual: usize },

    /// Forecast time unit outside day/week/month/year
    #[error("Invalid time unit: {0}")]
    InvalidUnit(String),

    /// Forecast period count is not positive, or projects past the calendar
    #[error("Invalid forecast count: {0}")]
    InvalidCount(i64),

    /// Parameter is not part of the catalog
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// Catalog data failed validation
    #[error("Invalid parameter catalog: {0}")]
    Catalog(String),
}

impl From<wqm_utils::error::DateError> for QualityError {
    fn from(e: wqm_utils::error::DateError) -> Self {
        QualityError::InvalidDate(e.0)
    }
}

impl From<csv::Error> for QualityError {
    fn from(e: csv::Error) -> Self {
        QualityError::Catalog(e.to_string())
    }
}

/// Type alias for Results using QualityError
pub type Result<T> = std::result::Result<T, QualityError>;
