//! Error taxonomy shared by ingestion and date normalization.

use chrono::ParseError as ChronoParseError;
use reqwest::Error as ReqwestError;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while loading or validating the dataset.
///
/// Filtering, aggregation, and visual mapping are total over well-typed
/// records and never produce these; everything here happens at the ingestion
/// boundary or when normalizing a typed date.
pub enum DataError {
    /// Network layer failed while fetching the dataset.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Reading the dataset file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The CSV structure or a typed cell could not be decoded.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// A date was not in the `YYYY-MM-DD` form.
    #[error("Invalid date: {0}")]
    Date(#[from] ChronoParseError),
    /// A row decoded but carried values outside the domain contract.
    #[error("Row {line}: {reason}")]
    InvalidRow {
        /// 1-based line number in the CSV file, header included.
        line: usize,
        /// What was wrong with the row.
        reason: String,
    },
}
