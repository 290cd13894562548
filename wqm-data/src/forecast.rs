//! Linear trend forecasting for a parameter series.
//!
//! Uses ordinary least squares over (elapsed days, value) pairs, where
//! elapsed days are counted from the earliest reading. Projections step
//! forward from the latest reading in whole days, weeks, 30-day months or
//! 365-day years.
//!
//! ## When to Use
//!
//! - Short-horizon outlook for a single parameter
//! - Series with a roughly steady drift

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use wqm_core::error::{QualityError, Result};
use wqm_core::series::Series;
use wqm_utils::dates::{add_days, days_between};

/// Below this the regression denominator is treated as zero (all readings
/// share one date).
const SINGULAR_EPSILON: f64 = 1e-10;

/// Step size for projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimeUnit {
    Day,
    Week,
    /// 30 days
    Month,
    /// 365 days
    Year,
}

impl TimeUnit {
    pub fn days(&self) -> u64 {
        match self {
            TimeUnit::Day => 1,
            TimeUnit::Week => 7,
            TimeUnit::Month => 30,
            TimeUnit::Year => 365,
        }
    }

    /// Resolve a menu code: 1 day, 2 week, 3 month, 4 year.
    pub fn from_code(code: i64) -> Result<TimeUnit> {
        match code {
            1 => Ok(TimeUnit::Day),
            2 => Ok(TimeUnit::Week),
            3 => Ok(TimeUnit::Month),
            4 => Ok(TimeUnit::Year),
            other => Err(QualityError::InvalidUnit(other.to_string())),
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            TimeUnit::Day => "days",
            TimeUnit::Week => "weeks",
            TimeUnit::Month => "months",
            TimeUnit::Year => "years",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = QualityError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        match lowered.as_str() {
            "day" | "days" | "d" => Ok(TimeUnit::Day),
            "week" | "weeks" | "w" => Ok(TimeUnit::Week),
            "month" | "months" | "m" => Ok(TimeUnit::Month),
            "year" | "years" | "y" => Ok(TimeUnit::Year),
            code => match code.parse::<i64>() {
                Ok(n) => TimeUnit::from_code(n),
                Err(_) => Err(QualityError::InvalidUnit(s.to_string())),
            },
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        };
        write!(f, "{}", name)
    }
}

/// Fitted line `value = slope * elapsed_days + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearModel {
    /// Change in value per day
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub n_observations: usize,
    /// Date of the earliest reading (elapsed day 0)
    pub origin: NaiveDate,
    pub last_date: NaiveDate,
    pub last_elapsed_days: i64,
}

impl LinearModel {
    pub fn predict(&self, elapsed_days: f64) -> f64 {
        self.slope * elapsed_days + self.intercept
    }
}

/// One projected value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// 1-based step number
    pub offset_index: u32,
    pub target_date: NaiveDate,
    pub predicted_value: f64,
}

/// Fit a least-squares line to the series over elapsed days.
///
/// Needs at least two readings. Readings that all share one date fit the
/// horizontal line through their mean.
pub fn fit(series: &Series) -> Result<LinearModel> {
    let readings = series.readings();
    if readings.len() < 2 {
        return Err(QualityError::InsufficientData {
            required: 2,
            actual: readings.len(),
        });
    }
    let origin = series.earliest()?.date;
    let last_date = series.latest()?.date;

    let points: Vec<(f64, f64)> = readings
        .iter()
        .map(|r| (days_between(&origin, &r.date) as f64, r.value))
        .collect();

    let n = points.len() as f64;
    let sum_t: f64 = points.iter().map(|(t, _)| t).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_t2: f64 = points.iter().map(|(t, _)| t * t).sum();
    let sum_ty: f64 = points.iter().map(|(t, y)| t * y).sum();

    // OLS formulas
    let denominator = n * sum_t2 - sum_t * sum_t;
    let (slope, intercept) = if denominator.abs() < SINGULAR_EPSILON {
        (0.0, sum_y / n)
    } else {
        let slope = (n * sum_ty - sum_t * sum_y) / denominator;
        (slope, (sum_y - slope * sum_t) / n)
    };

    let mean_y = sum_y / n;
    let ss_tot: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
    let ss_res: f64 = points
        .iter()
        .map(|(t, y)| (y - (slope * t + intercept)).powi(2))
        .sum();
    let r_squared = if ss_tot > SINGULAR_EPSILON {
        1.0 - ss_res / ss_tot
    } else {
        1.0
    };

    Ok(LinearModel {
        slope,
        intercept,
        r_squared,
        n_observations: readings.len(),
        origin,
        last_date,
        last_elapsed_days: days_between(&origin, &last_date),
    })
}

/// Project `count` values forward from `last_date`, one `unit` apart.
pub fn project(
    model: &LinearModel,
    last_date: NaiveDate,
    last_elapsed_days: i64,
    unit: TimeUnit,
    count: i64,
) -> Result<Vec<ForecastPoint>> {
    if count <= 0 || count > u32::MAX as i64 {
        return Err(QualityError::InvalidCount(count));
    }
    // the final step must land on the calendar before anything is built
    unit.days()
        .checked_mul(count as u64)
        .and_then(|days| add_days(&last_date, days))
        .ok_or(QualityError::InvalidCount(count))?;
    let mut points = Vec::new();
    for offset in 1..=count as u32 {
        let step_days = unit.days() * offset as u64;
        let target_date = add_days(&last_date, step_days).ok_or(QualityError::InvalidCount(count))?;
        let elapsed = last_elapsed_days + days_between(&last_date, &target_date);
        points.push(ForecastPoint {
            offset_index: offset,
            target_date,
            predicted_value: model.predict(elapsed as f64),
        });
    }
    Ok(points)
}

/// Fit the series and project from its latest reading.
pub fn forecast(series: &Series, unit: TimeUnit, count: i64) -> Result<Vec<ForecastPoint>> {
    let model = fit(series)?;
    project(&model, model.last_date, model.last_elapsed_days, unit, count)
}
