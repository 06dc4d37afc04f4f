//! Data types for observation series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a series
#[derive(Error, Debug)]
pub enum DataError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("row {row}: {message}")]
    Parse { row: usize, message: String },

    #[error("no data")]
    NoData,
}

/// One dated observation of the series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Start of the period the value belongs to
    pub period: NaiveDate,
    /// Observed value (sunspot count for the month)
    pub value: f64,
}

impl Observation {
    pub fn new(period: NaiveDate, value: f64) -> Self {
        Self { period, value }
    }

    /// Parses a period label.
    ///
    /// Accepts full dates (`1749-01-15`) and month labels (`1749-01`), the
    /// latter anchored to the first day of the month.
    pub fn parse_period(label: &str) -> Option<NaiveDate> {
        let label = label.trim().trim_matches('"');
        NaiveDate::parse_from_str(label, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", label), "%Y-%m-%d"))
            .ok()
    }
}

/// Extracts the raw values in chronological order
pub fn values(observations: &[Observation]) -> Vec<f64> {
    observations.iter().map(|o| o.value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_label() {
        let period = Observation::parse_period("1749-03").unwrap();
        assert_eq!(period, NaiveDate::from_ymd_opt(1749, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_full_date() {
        let period = Observation::parse_period("\"1983-12-31\"").unwrap();
        assert_eq!(period, NaiveDate::from_ymd_opt(1983, 12, 31).unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Observation::parse_period("Month").is_none());
    }
}
