//! Shifts — log return over a fixed look-back.
//!
//! shifts[t] = logPrice[t] - logPrice[t - period]
//! Lookback: period + 1 observations. Positions without a valid look-back,
//! and gaps in the input, are filled with 0 (no movement).

use super::Indicator;
use crate::factory::ConfigurationError;
use crate::series::TimeSeries;

/// Value used wherever the difference is undefined.
pub const SHIFTS_FILL: f64 = 0.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ShiftsIndicator {
    period: usize,
    name: String,
}

impl ShiftsIndicator {
    pub fn new(period: usize) -> Result<Self, ConfigurationError> {
        if period == 0 {
            return Err(ConfigurationError::InvalidParameter {
                indicator: "shifts".into(),
                param: "period",
                value: 0.0,
            });
        }
        Ok(Self {
            period,
            name: format!("shifts_{period}"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for ShiftsIndicator {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_window_size(&self) -> usize {
        self.period.saturating_add(1)
    }

    fn training(&self, log_price: &TimeSeries) -> TimeSeries {
        log_price.diff(self.period).fill_missing_with(SHIFTS_FILL)
    }

    fn last(&self, log_price: &TimeSeries) -> f64 {
        let values = log_price.values();
        let n = values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n <= self.period {
            return SHIFTS_FILL;
        }

        let (curr, prev) = (values[n - 1], values[n - 1 - self.period]);
        if curr.is_nan() || prev.is_nan() {
            return SHIFTS_FILL;
        }
        let diff = curr - prev;
        if diff.is_nan() {
            SHIFTS_FILL
        } else {
            diff
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};

    #[test]
    fn shifts_basic() {
        let prices = make_series(&[0.0, 0.1, 0.05, 0.15, 0.3]);
        let out = ShiftsIndicator::new(2).unwrap().training(&prices);

        assert_eq!(out.len(), 5);
        assert_eq!(out.values()[0], 0.0);
        assert_eq!(out.values()[1], 0.0);
        assert_approx(out.values()[2], 0.05, DEFAULT_EPSILON);
        assert_approx(out.values()[3], 0.05, DEFAULT_EPSILON);
        assert_approx(out.values()[4], 0.25, DEFAULT_EPSILON);
    }

    #[test]
    fn shifts_gap_is_zero() {
        let prices = make_series(&[0.0, f64::NAN, 0.2, 0.3]);
        let out = ShiftsIndicator::new(1).unwrap().training(&prices);
        assert_eq!(out.missing_count(), 0);
        assert_eq!(out.values()[1], 0.0);
        assert_eq!(out.values()[2], 0.0);
        assert_approx(out.values()[3], 0.1, DEFAULT_EPSILON);
    }

    #[test]
    fn shifts_period_longer_than_series() {
        let prices = make_series(&[0.0, 0.1]);
        let shifts = ShiftsIndicator::new(5).unwrap();
        assert!(shifts.training(&prices).values().iter().all(|&v| v == 0.0));
        assert_eq!(shifts.last(&prices), 0.0);
    }

    #[test]
    fn shifts_last_matches_training() {
        let prices = make_series(&[0.0, 0.4, 0.1, 0.7, 0.2]);
        let shifts = ShiftsIndicator::new(3).unwrap();
        assert_eq!(shifts.last(&prices), shifts.training(&prices).last().unwrap());
    }

    #[test]
    fn shifts_empty_series() {
        let shifts = ShiftsIndicator::new(1).unwrap();
        assert!(shifts.training(&TimeSeries::empty()).is_empty());
        assert!(shifts.last(&TimeSeries::empty()).is_nan());
    }

    #[test]
    fn shifts_all_missing() {
        let prices = make_series(&[f64::NAN; 6]);
        let shifts = ShiftsIndicator::new(2).unwrap();
        let out = shifts.training(&prices);
        assert_eq!(out.len(), 6);
        assert_eq!(out.missing_count(), 0);
        assert!(out.values().iter().all(|&v| v == 0.0));
        assert_eq!(shifts.last(&prices), 0.0);
    }

    #[test]
    fn shifts_huge_period_window() {
        let shifts = ShiftsIndicator::new(usize::MAX).unwrap();
        assert_eq!(shifts.min_window_size(), usize::MAX);
        assert_eq!(shifts.last(&make_series(&[0.0, 0.1])), 0.0);
    }

    #[test]
    fn shifts_rejects_zero_period() {
        assert!(ShiftsIndicator::new(0).is_err());
    }
}
