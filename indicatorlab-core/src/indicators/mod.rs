//! Indicator contract and the closed set of indicator policies.
//!
//! Indicators are pure functions: a log-price series in, a derived series on
//! the same dates out. They hold no state after construction, so one instance
//! can be shared across threads and reused for any number of instruments.
//!
//! The set of indicators is closed. `Indicator` is sealed and `IndicatorKind`
//! enumerates every implementation; the factory resolves names to variants.

pub mod rsi;
pub mod shifts;

pub use rsi::RsiIndicator;
pub use shifts::ShiftsIndicator;

use crate::series::TimeSeries;

mod private {
    pub trait Sealed {}

    impl Sealed for super::RsiIndicator {}
    impl Sealed for super::ShiftsIndicator {}
    impl Sealed for super::IndicatorKind {}
}

/// Trait for indicators.
///
/// `training` returns one value per input date. Positions without enough
/// history carry the indicator's fill value rather than a missing marker, so
/// consumers never special-case leading gaps.
pub trait Indicator: private::Sealed + Send + Sync {
    /// Canonical name, e.g. `rsi_14`.
    fn name(&self) -> &str;

    /// Leading observations required before the output is meaningful.
    fn min_window_size(&self) -> usize;

    /// Indicator value for every date of `log_price`.
    fn training(&self, log_price: &TimeSeries) -> TimeSeries;

    /// Indicator value at the most recent date of `log_price`.
    ///
    /// Agrees with `training(log_price).last()` on non-empty input. Callers
    /// normally pass only the trailing `min_window_size()` observations.
    fn last(&self, log_price: &TimeSeries) -> f64;
}

/// Every indicator the factory can build.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorKind {
    Rsi(RsiIndicator),
    Shifts(ShiftsIndicator),
}

impl IndicatorKind {
    fn inner(&self) -> &dyn Indicator {
        match self {
            IndicatorKind::Rsi(rsi) => rsi,
            IndicatorKind::Shifts(shifts) => shifts,
        }
    }
}

impl Indicator for IndicatorKind {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn min_window_size(&self) -> usize {
        self.inner().min_window_size()
    }

    fn training(&self, log_price: &TimeSeries) -> TimeSeries {
        self.inner().training(log_price)
    }

    fn last(&self, log_price: &TimeSeries) -> f64 {
        self.inner().last(log_price)
    }
}

impl From<RsiIndicator> for IndicatorKind {
    fn from(rsi: RsiIndicator) -> Self {
        IndicatorKind::Rsi(rsi)
    }
}

impl From<ShiftsIndicator> for IndicatorKind {
    fn from(shifts: ShiftsIndicator) -> Self {
        IndicatorKind::Shifts(shifts)
    }
}

/// Build a daily series starting 2024-01-02 from raw values.
#[cfg(test)]
pub fn make_series(values: &[f64]) -> TimeSeries {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    TimeSeries::from_pairs(
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (base_date + chrono::Duration::days(i as i64), v)),
    )
    .unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
