//! Loading the observation series from CSV files or over HTTP

use super::types::{DataError, Observation};
use csv::ReaderBuilder;
use log::{debug, info};
use std::io::Read;
use std::path::Path;

/// Monthly sunspot counts, 1749-1983
pub const SUNSPOTS_URL: &str =
    "https://raw.githubusercontent.com/jbrownlee/Datasets/master/monthly-sunspots.csv";

/// Column holding the value in the sunspots file (`Month,Sunspots`)
pub const DEFAULT_VALUE_COLUMN: usize = 1;

/// Parses a headed CSV whose first column is the period label.
///
/// `value_column` selects the numeric column. Rows keep file order.
pub fn parse_csv<R: Read>(reader: R, value_column: usize) -> Result<Vec<Observation>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut observations = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record?;

        // Footer lines in some dataset mirrors hold a single free-text cell
        if record.len() < 2 {
            debug!("skipping short row {}", row + 1);
            continue;
        }

        let label = record.get(0).unwrap_or_default();
        let period = Observation::parse_period(label).ok_or_else(|| DataError::Parse {
            row: row + 1,
            message: format!("unrecognised period '{}'", label),
        })?;

        let raw = record.get(value_column).ok_or_else(|| DataError::Parse {
            row: row + 1,
            message: format!("missing column {}", value_column),
        })?;
        let value: f64 = raw.parse().map_err(|_| DataError::Parse {
            row: row + 1,
            message: format!("'{}' is not a number", raw),
        })?;

        observations.push(Observation::new(period, value));
    }

    if observations.is_empty() {
        return Err(DataError::NoData);
    }

    Ok(observations)
}

/// Loads observations from a CSV file
pub fn load_csv<P: AsRef<Path>>(path: P, value_column: usize) -> Result<Vec<Observation>, DataError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let observations = parse_csv(file, value_column)?;
    info!("Loaded {} observations from {}", observations.len(), path.display());
    Ok(observations)
}

/// Downloads the series from a CSV endpoint
pub struct SeriesClient {
    client: reqwest::Client,
    url: String,
}

impl Default for SeriesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesClient {
    /// Creates a client for the monthly sunspots dataset
    pub fn new() -> Self {
        Self::with_url(SUNSPOTS_URL)
    }

    /// Creates a client for another CSV endpoint
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches and parses the whole series
    pub async fn fetch(&self, value_column: usize) -> Result<Vec<Observation>, DataError> {
        debug!("GET {}", self.url);

        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let observations = parse_csv(body.as_bytes(), value_column)?;
        info!("Downloaded {} observations from {}", observations.len(), self.url);
        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = "\"Month\",\"Sunspots\"\n\"1749-01\",58.0\n\"1749-02\",62.6\n\"1749-03\",70.0\n";

    #[test]
    fn test_parse_sunspots_format() {
        let observations = parse_csv(SAMPLE.as_bytes(), DEFAULT_VALUE_COLUMN).unwrap();

        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].period, NaiveDate::from_ymd_opt(1749, 1, 1).unwrap());
        assert_eq!(observations[1].value, 62.6);
        assert_eq!(observations[2].value, 70.0);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let data = "Month,Sunspots\n1749-01,abc\n";
        let err = parse_csv(data.as_bytes(), 1).unwrap_err();
        assert!(matches!(err, DataError::Parse { row: 1, .. }));
    }

    #[test]
    fn test_parse_empty_body() {
        let err = parse_csv("Month,Sunspots\n".as_bytes(), 1).unwrap_err();
        assert!(matches!(err, DataError::NoData));
    }

    #[test]
    fn test_parse_skips_footer() {
        let data = format!("{}Monthly sunspots\n", SAMPLE);
        let observations = parse_csv(data.as_bytes(), 1).unwrap();
        assert_eq!(observations.len(), 3);
    }

    #[test]
    fn test_client_url() {
        assert_eq!(SeriesClient::new().url(), SUNSPOTS_URL);
        assert_eq!(SeriesClient::with_url("http://localhost/x.csv").url(), "http://localhost/x.csv");
    }
}
