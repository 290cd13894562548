//! Range and trend evaluation of a single parameter series.

use chrono::NaiveDate;
use serde::Serialize;
use wqm_core::error::{QualityError, Result};
use wqm_core::parameter::{IdealRange, ParameterDefinition, RangeStatus};
use wqm_core::series::Series;

/// Direction of change between the two most recent readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Trend {
    Up,
    Down,
    Flat,
    /// Fewer than two readings
    Unknown,
}

/// How to report a trend when the latest value equals the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiePolicy {
    /// Equal values are `Flat`.
    #[default]
    Flat,
    /// Equal values are `Down`, matching legacy reports.
    Legacy,
}

impl TiePolicy {
    pub fn trend(&self, previous: f64, current: f64) -> Trend {
        if current > previous {
            Trend::Up
        } else if current < previous {
            Trend::Down
        } else {
            match self {
                TiePolicy::Flat => Trend::Flat,
                TiePolicy::Legacy => Trend::Down,
            }
        }
    }
}

/// Outcome of evaluating the current reading of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub parameter: String,
    pub unit: String,
    pub current_value: f64,
    pub current_date: NaiveDate,
    pub previous_value: Option<f64>,
    pub ideal_range: IdealRange,
    pub range_status: RangeStatus,
    pub trend: Trend,
    /// Suggested corrective action, present only when out of range
    pub remediation: Option<String>,
}

impl EvaluationResult {
    pub fn is_within_range(&self) -> bool {
        self.range_status == RangeStatus::Within
    }
}

/// Evaluate a series with the default tie policy.
pub fn evaluate(series: &Series, definition: &ParameterDefinition) -> Result<EvaluationResult> {
    evaluate_with(series, definition, TiePolicy::default())
}

/// Compare the latest reading of `series` against the definition's ideal
/// range and derive the trend from the reading before it.
pub fn evaluate_with(
    series: &Series,
    definition: &ParameterDefinition,
    policy: TiePolicy,
) -> Result<EvaluationResult> {
    let latest = series
        .latest()
        .map_err(|_| QualityError::NoData(series.parameter().to_string()))?;
    let previous_value = series.previous().ok().map(|r| r.value);
    let range_status = definition.ideal_range.classify(latest.value);
    let trend = match previous_value {
        Some(previous) => policy.trend(previous, latest.value),
        None => Trend::Unknown,
    };
    let remediation = match range_status {
        RangeStatus::Within => None,
        _ => definition.remediation.clone(),
    };
    Ok(EvaluationResult {
        parameter: series.parameter().to_string(),
        unit: definition.unit.clone(),
        current_value: latest.value,
        current_date: latest.date,
        previous_value,
        ideal_range: definition.ideal_range,
        range_status,
        trend,
        remediation,
    })
}
