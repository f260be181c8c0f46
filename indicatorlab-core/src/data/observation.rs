//! Stock observations and per-instrument price series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::DataError;
use crate::series::TimeSeries;

/// One closing price for one instrument on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockObservation {
    pub date: NaiveDate,
    pub symbol: String,
    pub close: f64,
}

impl StockObservation {
    pub fn new(date: NaiveDate, symbol: impl Into<String>, close: f64) -> Self {
        Self {
            date,
            symbol: symbol.into(),
            close,
        }
    }
}

/// How closes become series values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTransform {
    /// Natural log of the close. Non-positive closes become missing.
    #[default]
    Log,
    /// Closes as given (input is already log prices or any other series).
    Raw,
}

impl PriceTransform {
    pub fn apply(self, close: f64) -> f64 {
        match self {
            PriceTransform::Raw => close,
            PriceTransform::Log if close.is_finite() && close > 0.0 => close.ln(),
            PriceTransform::Log => f64::NAN,
        }
    }
}

/// Date-ordered price series for `symbol`.
pub fn price_series(
    observations: &[StockObservation],
    symbol: &str,
    transform: PriceTransform,
) -> Result<TimeSeries, DataError> {
    let rows: Vec<&StockObservation> = observations.iter().filter(|o| o.symbol == symbol).collect();
    if rows.is_empty() {
        return Err(DataError::UnknownSymbol {
            symbol: symbol.to_string(),
        });
    }
    build_series(symbol, rows, transform)
}

/// One price series per symbol, in symbol order.
pub fn group_by_symbol(
    observations: &[StockObservation],
    transform: PriceTransform,
) -> Result<BTreeMap<String, TimeSeries>, DataError> {
    let mut grouped: BTreeMap<&str, Vec<&StockObservation>> = BTreeMap::new();
    for obs in observations {
        grouped.entry(obs.symbol.as_str()).or_default().push(obs);
    }

    grouped
        .into_iter()
        .map(|(symbol, rows)| Ok((symbol.to_string(), build_series(symbol, rows, transform)?)))
        .collect()
}

fn build_series(
    symbol: &str,
    mut rows: Vec<&StockObservation>,
    transform: PriceTransform,
) -> Result<TimeSeries, DataError> {
    rows.sort_by_key(|o| o.date);
    if let Some(pair) = rows.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(DataError::DuplicateDate {
            symbol: symbol.to_string(),
            date: pair[0].date,
        });
    }

    let mut dropped = 0usize;
    let (index, values): (Vec<NaiveDate>, Vec<f64>) = rows
        .iter()
        .map(|o| {
            let value = transform.apply(o.close);
            if value.is_nan() && !o.close.is_nan() {
                dropped += 1;
            }
            (o.date, value)
        })
        .unzip();
    if dropped > 0 {
        warn!(symbol, dropped, "closes not usable as log prices were marked missing");
    }

    Ok(TimeSeries::with_values(index.into(), values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn log_transform() {
        assert_eq!(PriceTransform::Log.apply(1.0), 0.0);
        assert!(PriceTransform::Log.apply(0.0).is_nan());
        assert!(PriceTransform::Log.apply(-2.0).is_nan());
        assert_eq!(PriceTransform::Raw.apply(-2.0), -2.0);
    }

    #[test]
    fn series_is_sorted_by_date() {
        let obs = vec![
            StockObservation::new(d(4), "SPY", 102.0),
            StockObservation::new(d(2), "SPY", 100.0),
            StockObservation::new(d(3), "QQQ", 50.0),
            StockObservation::new(d(3), "SPY", 101.0),
        ];
        let s = price_series(&obs, "SPY", PriceTransform::Raw).unwrap();
        assert_eq!(s.index(), &[d(2), d(3), d(4)]);
        assert_eq!(s.values(), &[100.0, 101.0, 102.0]);
    }

    #[test]
    fn log_prices_by_default() {
        let obs = vec![
            StockObservation::new(d(2), "SPY", std::f64::consts::E),
            StockObservation::new(d(3), "SPY", 0.0),
        ];
        let s = price_series(&obs, "SPY", PriceTransform::default()).unwrap();
        assert!((s.values()[0] - 1.0).abs() < 1e-12);
        assert!(s.values()[1].is_nan());
    }

    #[test]
    fn duplicate_date_rejected() {
        let obs = vec![
            StockObservation::new(d(2), "SPY", 100.0),
            StockObservation::new(d(2), "SPY", 101.0),
        ];
        match price_series(&obs, "SPY", PriceTransform::Raw) {
            Err(DataError::DuplicateDate { symbol, date }) => {
                assert_eq!(symbol, "SPY");
                assert_eq!(date, d(2));
            }
            other => panic!("expected DuplicateDate, got {other:?}"),
        }
    }

    #[test]
    fn unknown_symbol() {
        let obs = vec![StockObservation::new(d(2), "SPY", 100.0)];
        assert!(matches!(
            price_series(&obs, "IWM", PriceTransform::Raw),
            Err(DataError::UnknownSymbol { .. })
        ));
    }

    #[test]
    fn grouping() {
        let obs = vec![
            StockObservation::new(d(2), "SPY", 100.0),
            StockObservation::new(d(2), "QQQ", 50.0),
            StockObservation::new(d(3), "QQQ", 51.0),
        ];
        let grouped = group_by_symbol(&obs, PriceTransform::Raw).unwrap();
        assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["QQQ", "SPY"]);
        assert_eq!(grouped["QQQ"].len(), 2);
        assert_eq!(grouped["SPY"].len(), 1);
    }
}
