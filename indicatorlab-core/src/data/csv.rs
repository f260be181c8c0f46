//! CSV ingestion of price observations.
//!
//! Expected header: `date,symbol,close`. Dates are ISO (`YYYY-MM-DD`); an
//! empty close is read as a missing value. Extra columns are ignored.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use super::{DataError, StockObservation};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    symbol: String,
    close: Option<f64>,
}

/// Read observations from any CSV source.
pub fn read_observations<R: Read>(reader: R) -> Result<Vec<StockObservation>, DataError> {
    let mut csv = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .from_reader(reader);

    let mut observations = Vec::new();
    for row in csv.deserialize::<CsvRow>() {
        let row = row?;
        observations.push(StockObservation {
            date: row.date,
            symbol: row.symbol,
            close: row.close.unwrap_or(f64::NAN),
        });
    }
    Ok(observations)
}

/// Read observations from a CSV file.
pub fn read_observations_from_path(path: &Path) -> Result<Vec<StockObservation>, DataError> {
    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let observations = read_observations(file)?;
    debug!(path = %path.display(), rows = observations.len(), "observations loaded");
    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
date,symbol,close
2024-01-02,SPY,470.5
2024-01-03, SPY ,468.1
2024-01-02,QQQ,
";

    #[test]
    fn parses_rows() {
        let obs = read_observations(SAMPLE.as_bytes()).unwrap();
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(obs[0].close, 470.5);
        assert_eq!(obs[1].symbol, "SPY");
        assert!(obs[2].close.is_nan());
    }

    #[test]
    fn bad_date_is_csv_error() {
        let input = "date,symbol,close\n01/02/2024,SPY,1.0\n";
        assert!(matches!(
            read_observations(input.as_bytes()),
            Err(DataError::Csv(_))
        ));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let obs = read_observations_from_path(file.path()).unwrap();
        assert_eq!(obs.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_observations_from_path(Path::new("/nonexistent/prices.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
