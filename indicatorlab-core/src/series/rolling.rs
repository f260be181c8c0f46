//! Fixed-size rolling windows.
//!
//! Position `i` reduces the `window` values ending at `i`, inclusive. The
//! first `window - 1` positions have no full window and are missing, as is
//! any position whose window contains a missing value. Each window is reduced
//! from its own slice, so a value depends only on the observations inside it.

use std::sync::Arc;

use super::TimeSeries;

/// Rolling view over a series. Created by [`TimeSeries::rolling`].
#[derive(Debug, Clone, Copy)]
pub struct Rolling<'a, K> {
    series: &'a TimeSeries<K>,
    window: usize,
}

impl<'a, K: Ord + Clone> Rolling<'a, K> {
    pub(crate) fn new(series: &'a TimeSeries<K>, window: usize) -> Self {
        Self { series, window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Reduce every complete window with `f`.
    pub fn reduce<F>(&self, f: F) -> TimeSeries<K>
    where
        F: Fn(&[f64]) -> f64,
    {
        let values = self.series.values();
        let n = values.len();
        let mut result = vec![f64::NAN; n];

        if self.window == 0 || n < self.window {
            return TimeSeries::with_values(Arc::clone(self.series.shared_index()), result);
        }

        for (i, window) in values.windows(self.window).enumerate() {
            if window.iter().any(|v| v.is_nan()) {
                continue;
            }
            result[i + self.window - 1] = f(window);
        }

        TimeSeries::with_values(Arc::clone(self.series.shared_index()), result)
    }

    /// Arithmetic mean of each window.
    pub fn mean(&self) -> TimeSeries<K> {
        self.reduce(|w| w.iter().sum::<f64>() / w.len() as f64)
    }

    pub fn sum(&self) -> TimeSeries<K> {
        self.reduce(|w| w.iter().sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> TimeSeries<u32> {
        TimeSeries::new((0..values.len() as u32).collect(), values.to_vec()).unwrap()
    }

    #[test]
    fn mean_leading_positions_missing() {
        let m = series(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0])
            .rolling(5)
            .mean();
        assert_eq!(m.len(), 7);
        for i in 0..4 {
            assert!(m.values()[i].is_nan(), "expected missing at {i}");
        }
        assert_eq!(&m.values()[4..], &[12.0, 13.0, 14.0]);
    }

    #[test]
    fn window_of_one_is_identity() {
        let s = series(&[1.0, 2.0, 3.0]);
        assert_eq!(s.rolling(1).mean().values(), s.values());
    }

    #[test]
    fn missing_inside_window_propagates() {
        let m = series(&[10.0, 11.0, f64::NAN, 13.0, 14.0, 15.0])
            .rolling(3)
            .sum();
        assert!(m.values()[2].is_nan());
        assert!(m.values()[3].is_nan());
        assert!(m.values()[4].is_nan());
        assert_eq!(m.values()[5], 42.0);
    }

    #[test]
    fn window_longer_than_series() {
        let m = series(&[1.0, 2.0]).rolling(5).mean();
        assert_eq!(m.missing_count(), 2);
    }

    #[test]
    fn zero_window_is_all_missing() {
        let m = series(&[1.0, 2.0]).rolling(0).reduce(|w| w.len() as f64);
        assert_eq!(m.missing_count(), 2);
    }

    #[test]
    fn custom_reducer() {
        let max = series(&[3.0, 1.0, 4.0, 1.0, 5.0])
            .rolling(2)
            .reduce(|w| w.iter().copied().fold(f64::MIN, f64::max));
        assert_eq!(&max.values()[1..], &[3.0, 4.0, 4.0, 5.0]);
    }
}
