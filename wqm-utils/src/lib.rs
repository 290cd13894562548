//! Shared utility functions for WQM crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{Days, NaiveDate};

    /// Date format used for persisted readings: "dd/mm/yy"
    pub const DATE_FORMAT: &str = "%d/%m/%y";

    /// Date format used when displaying derived dates: "dd/mm/yyyy"
    pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

    /// Format a NaiveDate as "dd/mm/yy"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Format a NaiveDate as "dd/mm/yyyy"
    pub fn format_display_date(date: &NaiveDate) -> String {
        date.format(DISPLAY_FORMAT).to_string()
    }

    /// Parse a date string in "dd/mm/yy" format.
    ///
    /// Surrounding whitespace is ignored. Four-digit years are rejected.
    pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
        let trimmed = s.trim();
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map_err(|e| DateError(format!("'{}' is not a dd/mm/yy date ({})", trimmed, e)))
    }

    /// Whole days from `start` to `end`. Negative when `end` precedes `start`.
    pub fn days_between(start: &NaiveDate, end: &NaiveDate) -> i64 {
        (*end - *start).num_days()
    }

    /// Add a number of days to a date, returning `None` on calendar overflow.
    pub fn add_days(date: &NaiveDate, days: u64) -> Option<NaiveDate> {
        date.checked_add_days(Days::new(days))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_parse_date_two_digit_year() {
            let date = parse_date("02/01/24").unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());

            let padded = parse_date("  15/06/23 ").unwrap();
            assert_eq!(padded, NaiveDate::from_ymd_opt(2023, 6, 15).unwrap());
        }

        #[test]
        fn test_parse_date_rejects_bad_input() {
            assert!(parse_date("").is_err());
            assert!(parse_date("31/02/24").is_err());
            assert!(parse_date("2024-01-01").is_err());
            assert!(parse_date("01/13/24").is_err());
            assert!(parse_date("01/01/2024").is_err());
        }

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "15/06/23");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
            assert_eq!(format_display_date(&date), "15/06/2023");
        }

        #[test]
        fn test_days_between_and_add_days() {
            let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
            let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
            assert_eq!(days_between(&start, &end), 2); // 2024 is a leap year
            assert_eq!(days_between(&end, &start), -2);
            assert_eq!(add_days(&start, 2), Some(end));
            assert_eq!(add_days(&NaiveDate::MAX, 1), None);
        }
    }
}

/// Parameter name helpers shared by the catalog and the storage layer.
pub mod names {
    /// Normalize a parameter name for use in a storage identifier:
    /// spaces become underscores and parentheses are stripped.
    ///
    /// e.g. "Biochemical Oxygen Demand (BOD)" -> "Biochemical_Oxygen_Demand_BOD"
    pub fn file_stem(parameter: &str) -> String {
        parameter
            .trim()
            .chars()
            .filter(|c| *c != '(' && *c != ')')
            .map(|c| if c == ' ' { '_' } else { c })
            .collect()
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
