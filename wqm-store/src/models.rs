//! Row structs for the series CSV files.

use serde::{Deserialize, Serialize};
use wqm_core::series::Reading;
use wqm_utils::dates::format_date;

/// Prefix of every series file name.
pub const SERIES_FILE_PREFIX: &str = "DATA_";

/// Extension of series files.
pub const SERIES_FILE_EXTENSION: &str = "csv";

/// One stored reading: `Date,Parameter,Value,Unit`.
///
/// The date is kept as `dd/mm/yy` text and the value as written, so a
/// malformed row can be reported with its original content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Parameter")]
    pub parameter: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Unit")]
    pub unit: String,
}

impl SeriesRow {
    pub fn from_reading(parameter: &str, unit: &str, reading: &Reading) -> Self {
        Self {
            date: format_date(&reading.date),
            parameter: parameter.to_string(),
            value: reading.value.to_string(),
            unit: unit.to_string(),
        }
    }
}
