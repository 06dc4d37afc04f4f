//! # Observation series input
//!
//! Thin I/O around the forecasting core: reading a dated numeric column
//! from CSV, either from disk or over HTTP.
//!
//! ```rust,no_run
//! use sunspot_rnn::data::{values, SeriesClient, DEFAULT_VALUE_COLUMN};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let observations = SeriesClient::new().fetch(DEFAULT_VALUE_COLUMN).await?;
//!     let series = values(&observations);
//!     println!("{} months", series.len());
//!     Ok(())
//! }
//! ```

mod loader;
mod types;

pub use loader::{load_csv, parse_csv, SeriesClient, DEFAULT_VALUE_COLUMN, SUNSPOTS_URL};
pub use types::{values, DataError, Observation};
