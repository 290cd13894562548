use crate::error::{QualityError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wqm_utils::dates::parse_date;

/// A single dated measurement. The value is always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub date: NaiveDate,
    pub value: f64,
}

impl Reading {
    pub fn new(date: NaiveDate, value: f64) -> Result<Reading> {
        if !value.is_finite() {
            return Err(QualityError::InvalidValue(format!(
                "{} is not a finite number",
                value
            )));
        }
        Ok(Reading { date, value })
    }

    /// Build a reading from boundary text: a dd/mm/yy date and a numeric value.
    pub fn parse(date: &str, value: &str) -> Result<Reading> {
        let date = parse_date(date)?;
        let trimmed = value.trim();
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| QualityError::InvalidValue(format!("'{}' is not a number", trimmed)))?;
        Reading::new(date, value)
    }
}

/// Readings of one parameter, stored in insertion order.
///
/// Storage order is never assumed to be chronological: the "current"
/// reading is always the one with the greatest date, with later insertions
/// winning ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    parameter: String,
    readings: Vec<Reading>,
}

impl Series {
    pub fn new(parameter: impl Into<String>) -> Series {
        Series {
            parameter: parameter.into(),
            readings: Vec::new(),
        }
    }

    pub fn with_readings(parameter: impl Into<String>, readings: Vec<Reading>) -> Series {
        Series {
            parameter: parameter.into(),
            readings,
        }
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// Readings in insertion order.
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Validate a dd/mm/yy date and a value and return a new series holding
    /// the existing readings plus the new one. `self` is left untouched, so a
    /// rejected reading never disturbs stored data.
    pub fn append(&self, date: &str, value: f64) -> Result<Series> {
        let date = parse_date(date)?;
        let reading = Reading::new(date, value)?;
        let mut next = self.clone();
        next.readings.push(reading);
        Ok(next)
    }

    /// Merge already-validated readings onto the end of the series.
    pub fn extend(&mut self, readings: impl IntoIterator<Item = Reading>) {
        self.readings.extend(readings);
    }

    pub fn push(&mut self, reading: Reading) {
        self.readings.push(reading);
    }

    /// Readings sorted by date; equal dates keep insertion order.
    pub fn chronological(&self) -> Vec<&Reading> {
        let mut sorted: Vec<&Reading> = self.readings.iter().collect();
        // sort_by_key is stable
        sorted.sort_by_key(|r| r.date);
        sorted
    }

    /// The reading with the greatest date.
    pub fn latest(&self) -> Result<&Reading> {
        self.readings
            .iter()
            .enumerate()
            .max_by_key(|(position, r)| (r.date, *position))
            .map(|(_, r)| r)
            .ok_or_else(|| QualityError::Empty(self.parameter.clone()))
    }

    /// The reading immediately before `latest` in date order.
    pub fn previous(&self) -> Result<&Reading> {
        let sorted = self.chronological();
        if sorted.len() < 2 {
            return Err(QualityError::Empty(self.parameter.clone()));
        }
        Ok(sorted[sorted.len() - 2])
    }

    /// The reading with the smallest date; earlier insertions win ties.
    pub fn earliest(&self) -> Result<&Reading> {
        self.readings
            .iter()
            .enumerate()
            .min_by_key(|(position, r)| (r.date, *position))
            .map(|(_, r)| r)
            .ok_or_else(|| QualityError::Empty(self.parameter.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_append_returns_new_series() {
        let empty = Series::new("pH");
        let one = empty.append("01/01/24", 7.0).unwrap();
        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(one.readings()[0], Reading { date: date(2024, 1, 1), value: 7.0 });
    }

    #[test]
    fn test_append_rejects_bad_input_without_touching_series() {
        let series = Series::new("pH").append("01/01/24", 7.0).unwrap();
        assert!(matches!(
            series.append("32/01/24", 7.1),
            Err(QualityError::InvalidDate(_))
        ));
        assert!(matches!(
            series.append("02/01/24", f64::NAN),
            Err(QualityError::InvalidValue(_))
        ));
        assert!(matches!(
            series.append("02/01/24", f64::INFINITY),
            Err(QualityError::InvalidValue(_))
        ));
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_reading_parse() {
        let reading = Reading::parse("15/03/24", " 7.25 ").unwrap();
        assert_eq!(reading.date, date(2024, 3, 15));
        assert_eq!(reading.value, 7.25);
        assert!(matches!(
            Reading::parse("15/03/24", "seven"),
            Err(QualityError::InvalidValue(_))
        ));
        assert!(matches!(
            Reading::parse("15-03-24", "7"),
            Err(QualityError::InvalidDate(_))
        ));
        assert!(matches!(
            Reading::parse("15/03/24", "inf"),
            Err(QualityError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_latest_uses_date_not_insertion_order() {
        let series = Series::new("Turbidity")
            .append("10/01/24", 3.0)
            .and_then(|s| s.append("20/01/24", 4.0))
            .and_then(|s| s.append("05/01/24", 1.0))
            .unwrap();
        let latest = series.latest().unwrap();
        assert_eq!(latest.date, date(2024, 1, 20));
        assert_eq!(latest.value, 4.0);

        let previous = series.previous().unwrap();
        assert_eq!(previous.date, date(2024, 1, 10));

        let earliest = series.earliest().unwrap();
        assert_eq!(earliest.value, 1.0);
    }

    #[test]
    fn test_latest_tie_goes_to_later_insertion() {
        let series = Series::new("pH")
            .append("01/01/24", 7.0)
            .and_then(|s| s.append("01/01/24", 7.4))
            .unwrap();
        assert_eq!(series.latest().unwrap().value, 7.4);
        assert_eq!(series.previous().unwrap().value, 7.0);
    }

    #[test]
    fn test_latest_matches_max_date_for_any_order() {
        let dates = ["03/02/24", "01/01/23", "28/02/24", "15/07/22", "01/03/24", "29/02/24"];
        let mut series = Series::new("Nitrates");
        for (i, d) in dates.iter().enumerate() {
            series = series.append(d, i as f64).unwrap();
            let expected = series.readings().iter().map(|r| r.date).max().unwrap();
            assert_eq!(series.latest().unwrap().date, expected);
        }
        assert_eq!(series.latest().unwrap().date, date(2024, 3, 1));
    }

    #[test]
    fn test_empty_series() {
        let series = Series::new("pH");
        assert_eq!(series.latest(), Err(QualityError::Empty("pH".to_string())));
        assert_eq!(series.previous(), Err(QualityError::Empty("pH".to_string())));

        let one = series.append("01/01/24", 7.0).unwrap();
        assert!(one.latest().is_ok());
        assert!(one.previous().is_err());
    }

    #[test]
    fn test_chronological_and_extend() {
        let mut series = Series::new("pH").append("03/01/24", 7.3).unwrap();
        series.extend(vec![
            Reading::new(date(2024, 1, 1), 7.1).unwrap(),
            Reading::new(date(2024, 1, 2), 7.2).unwrap(),
        ]);
        let values: Vec<f64> = series.chronological().iter().map(|r| r.value).collect();
        assert_eq!(values, vec![7.1, 7.2, 7.3]);
        // storage keeps insertion order
        assert_eq!(series.readings()[0].value, 7.3);
    }
}
