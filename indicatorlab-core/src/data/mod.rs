//! Price observations and their ingestion.
//!
//! Observations arrive as flat `(date, symbol, close)` rows, from CSV or from
//! the caller. They are grouped per instrument into date-keyed price series
//! (log-transformed by default) that the indicators consume.

pub mod csv;
pub mod observation;

pub use self::csv::{read_observations, read_observations_from_path};
pub use observation::{group_by_symbol, price_series, PriceTransform, StockObservation};

use chrono::NaiveDate;
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("duplicate observation for '{symbol}' on {date}")]
    DuplicateDate { symbol: String, date: NaiveDate },

    #[error("no observations for symbol '{symbol}'")]
    UnknownSymbol { symbol: String },
}
