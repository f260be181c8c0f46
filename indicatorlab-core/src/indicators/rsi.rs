//! Relative Strength Index (RSI) over log prices.
//!
//! delta = day-over-day log-price change (the first day has none)
//! up = max(delta, 0), down = min(delta, 0)
//! rs = mean(up, period) / mean(down, period)
//! RSI = 100 - 100 / (1 + rs)
//! Lookback: period + 1 observations.
//!
//! `down` is never positive, so `rs` keeps IEEE-754 division semantics: an
//! all-gain window divides by zero and lands on 100, a flat window is 0/0 and
//! becomes missing. Every missing output, including the leading `period`
//! positions, is filled with the neutral midpoint 50.
//!
//! Mixed windows give a negative `rs`, so values can fall outside [0, 100].
//! When gains and losses balance exactly, `rs == -1` and `1 + rs` is zero:
//! the result is `-inf`, which is not missing and is kept as is.

use super::Indicator;
use crate::factory::ConfigurationError;
use crate::series::TimeSeries;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Value used wherever RSI is undefined.
pub const RSI_NEUTRAL: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RsiIndicator {
    period: usize,
    name: String,
}

impl RsiIndicator {
    pub fn new(period: usize) -> Result<Self, ConfigurationError> {
        if period == 0 {
            return Err(ConfigurationError::InvalidParameter {
                indicator: "rsi".into(),
                param: "period",
                value: 0.0,
            });
        }
        Ok(Self {
            period,
            name: format!("rsi_{period}"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// RSI on the dates where it is defined, without filling.
    ///
    /// The result is indexed from the second observation onwards.
    fn raw(&self, log_price: &TimeSeries) -> TimeSeries {
        let delta = log_price.diff(1).skip(1).fill_missing_with(0.0);
        let up = delta.map(|d| d.max(0.0));
        let down = delta.map(|d| d.min(0.0));

        let up_avg = up.rolling(self.period).mean();
        let down_avg = down.rolling(self.period).mean();

        let rs = &up_avg / &down_avg;
        rs.map(|rs| 100.0 - 100.0 / (1.0 + rs))
    }
}

impl Default for RsiIndicator {
    fn default() -> Self {
        Self {
            period: DEFAULT_RSI_PERIOD,
            name: format!("rsi_{DEFAULT_RSI_PERIOD}"),
        }
    }
}

impl Indicator for RsiIndicator {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_window_size(&self) -> usize {
        self.period.saturating_add(1)
    }

    fn training(&self, log_price: &TimeSeries) -> TimeSeries {
        self.raw(log_price)
            .reindex_like(log_price)
            .fill_missing_with(RSI_NEUTRAL)
    }

    fn last(&self, log_price: &TimeSeries) -> f64 {
        let window = log_price.tail(self.min_window_size());
        match self.raw(&window).last() {
            Some(v) if !v.is_nan() => v,
            _ => RSI_NEUTRAL,
        }
    }
}
