//! Elementwise arithmetic between series and between a series and a scalar.
//!
//! Series operands are aligned by key over the union of both indices. A key
//! missing from either side, or holding a missing value, yields missing.
//! Everything else follows IEEE-754: `x / 0.0` is an infinity, `0.0 / 0.0`
//! is NaN (and therefore missing).

use std::ops::{Add, Div, Mul, Sub};
use std::sync::Arc;

use super::TimeSeries;

impl<K: Ord + Clone> TimeSeries<K> {
    /// Combine two series key by key with `f`.
    pub fn zip_with<F>(&self, other: &TimeSeries<K>, f: F) -> TimeSeries<K>
    where
        F: Fn(f64, f64) -> f64,
    {
        let apply = |a: f64, b: f64| {
            if a.is_nan() || b.is_nan() {
                f64::NAN
            } else {
                f(a, b)
            }
        };

        if Arc::ptr_eq(self.shared_index(), other.shared_index()) || self.index() == other.index() {
            let values = self
                .values()
                .iter()
                .zip(other.values())
                .map(|(&a, &b)| apply(a, b))
                .collect();
            return TimeSeries::with_values(Arc::clone(self.shared_index()), values);
        }

        let (left, right) = (self.index(), other.index());
        let mut index = Vec::with_capacity(left.len().max(right.len()));
        let mut values = Vec::with_capacity(left.len().max(right.len()));
        let (mut i, mut j) = (0, 0);
        while i < left.len() || j < right.len() {
            match (left.get(i), right.get(j)) {
                (Some(a), Some(b)) if a == b => {
                    index.push(a.clone());
                    values.push(apply(self.values()[i], other.values()[j]));
                    i += 1;
                    j += 1;
                }
                (Some(a), Some(b)) if a < b => {
                    index.push(a.clone());
                    values.push(f64::NAN);
                    i += 1;
                }
                (Some(a), None) => {
                    index.push(a.clone());
                    values.push(f64::NAN);
                    i += 1;
                }
                (_, Some(b)) => {
                    index.push(b.clone());
                    values.push(f64::NAN);
                    j += 1;
                }
                (None, None) => break,
            }
        }
        TimeSeries::with_values(index.into(), values)
    }
}

macro_rules! impl_series_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<K: Ord + Clone> $trait<&TimeSeries<K>> for &TimeSeries<K> {
            type Output = TimeSeries<K>;

            fn $method(self, rhs: &TimeSeries<K>) -> TimeSeries<K> {
                self.zip_with(rhs, |a, b| a $op b)
            }
        }

        impl<K: Ord + Clone> $trait<f64> for &TimeSeries<K> {
            type Output = TimeSeries<K>;

            fn $method(self, rhs: f64) -> TimeSeries<K> {
                let values = self
                    .values()
                    .iter()
                    .map(|&a| if a.is_nan() { f64::NAN } else { a $op rhs })
                    .collect();
                TimeSeries::with_values(Arc::clone(self.shared_index()), values)
            }
        }
    };
}

impl_series_op!(Add, add, +);
impl_series_op!(Sub, sub, -);
impl_series_op!(Mul, mul, *);
impl_series_op!(Div, div, /);
