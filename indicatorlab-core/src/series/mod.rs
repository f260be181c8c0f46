//! Indexed numeric time series.
//!
//! A `TimeSeries` maps a strictly increasing key (a trading date by default)
//! to an `f64`. `NaN` is the missing marker; it is distinct from zero and
//! propagates through arithmetic until a fill policy replaces it.
//!
//! Series are persistent: the key index lives behind an `Arc` shared by every
//! series derived from it, and no operation writes into its receiver.

pub mod arith;
pub mod rolling;

pub use rolling::Rolling;

use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised when constructing a series from raw parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("index has {keys} keys but {values} values were supplied")]
    LengthMismatch { keys: usize, values: usize },

    #[error("index is not strictly increasing at position {position}")]
    UnorderedIndex { position: usize },
}

/// Ordered key → value series with explicit missing values.
#[derive(Debug, Clone)]
pub struct TimeSeries<K = NaiveDate> {
    index: Arc<[K]>,
    values: Vec<f64>,
}

fn check_strictly_increasing<K: Ord>(keys: &[K]) -> Result<(), SeriesError> {
    match keys.windows(2).position(|w| w[0] >= w[1]) {
        Some(i) => Err(SeriesError::UnorderedIndex { position: i + 1 }),
        None => Ok(()),
    }
}

impl<K: Ord + Clone> TimeSeries<K> {
    /// Build a series from an index and a parallel vector of values.
    pub fn new(index: Vec<K>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if index.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                keys: index.len(),
                values: values.len(),
            });
        }
        check_strictly_increasing(&index)?;
        Ok(Self {
            index: index.into(),
            values,
        })
    }

    /// Build a series from `(key, value)` pairs already in key order.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let (index, values): (Vec<K>, Vec<f64>) = pairs.into_iter().unzip();
        Self::new(index, values)
    }

    pub fn empty() -> Self {
        Self {
            index: Arc::from(Vec::new()),
            values: Vec::new(),
        }
    }

    /// Share `index` with a fresh value vector. Callers guarantee equal lengths.
    pub(crate) fn with_values(index: Arc<[K]>, values: Vec<f64>) -> Self {
        debug_assert_eq!(index.len(), values.len());
        Self { index, values }
    }

    pub(crate) fn shared_index(&self) -> &Arc<[K]> {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn index(&self) -> &[K] {
        &self.index
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.index.iter().zip(self.values.iter().copied())
    }

    /// Stored value at `key`. A present key may still hold a missing value.
    pub fn get(&self, key: &K) -> Option<f64> {
        self.index
            .binary_search(key)
            .ok()
            .map(|i| self.values[i])
    }

    pub fn first_key(&self) -> Option<&K> {
        self.index.first()
    }

    pub fn last_key(&self) -> Option<&K> {
        self.index.last()
    }

    /// Value at the most recent key.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }

    /// Positional sub-series `[start, end)`, clamped to the series bounds.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.len());
        let start = start.min(end);
        Self {
            index: Arc::from(&self.index[start..end]),
            values: self.values[start..end].to_vec(),
        }
    }

    /// The last `n` observations.
    pub fn tail(&self, n: usize) -> Self {
        self.slice(self.len().saturating_sub(n), self.len())
    }

    /// Everything after the first `n` observations.
    pub fn skip(&self, n: usize) -> Self {
        self.slice(n, self.len())
    }

    /// Value at position `i` becomes the value at `i - n`; the first `n`
    /// positions are missing.
    pub fn shift(&self, n: usize) -> Self {
        let len = self.len();
        let lag = n.min(len);
        let mut values = vec![f64::NAN; lag];
        values.extend_from_slice(&self.values[..len - lag]);
        Self::with_values(Arc::clone(&self.index), values)
    }

    /// `self[t] - self[t - n]`, missing where no look-back exists.
    pub fn diff(&self, n: usize) -> Self {
        self - &self.shift(n)
    }

    /// Apply `f` to every present value. Missing values stay missing.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        let values = self
            .values
            .iter()
            .map(|&v| if v.is_nan() { f64::NAN } else { f(v) })
            .collect();
        Self::with_values(Arc::clone(&self.index), values)
    }

    /// Replace each missing value with `f(position, key)`.
    pub fn fill_missing<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, &K) -> f64,
    {
        let values = self
            .iter()
            .enumerate()
            .map(|(i, (key, v))| if v.is_nan() { f(i, key) } else { v })
            .collect();
        Self::with_values(Arc::clone(&self.index), values)
    }

    pub fn fill_missing_with(&self, value: f64) -> Self {
        self.fill_missing(|_, _| value)
    }

    /// Carry the last present value forward. Leading gaps stay missing.
    pub fn forward_fill(&self) -> Self {
        let mut carry = f64::NAN;
        let values = self
            .values
            .iter()
            .map(|&v| {
                if !v.is_nan() {
                    carry = v;
                }
                carry
            })
            .collect();
        Self::with_values(Arc::clone(&self.index), values)
    }

    /// Project onto `keys`. Keys absent from this series become missing.
    pub fn reindex(&self, keys: &[K]) -> Result<Self, SeriesError> {
        check_strictly_increasing(keys)?;
        let index: Arc<[K]> = Arc::from(keys);
        let values = self.project(&index);
        Ok(Self::with_values(index, values))
    }

    /// Project onto the index of `other`, sharing it.
    pub fn reindex_like(&self, other: &TimeSeries<K>) -> Self {
        if Arc::ptr_eq(&self.index, &other.index) {
            return self.clone();
        }
        let values = self.project(&other.index);
        Self::with_values(Arc::clone(&other.index), values)
    }

    /// Merge-walk of two sorted indices.
    fn project(&self, target: &[K]) -> Vec<f64> {
        let mut values = Vec::with_capacity(target.len());
        let mut j = 0;
        for key in target {
            while j < self.index.len() && self.index[j] < *key {
                j += 1;
            }
            if j < self.index.len() && self.index[j] == *key {
                values.push(self.values[j]);
            } else {
                values.push(f64::NAN);
            }
        }
        values
    }

    /// Rolling window view with `window` observations per position.
    pub fn rolling(&self, window: usize) -> Rolling<'_, K> {
        Rolling::new(self, window)
    }
}

impl<K: Ord + Clone> Default for TimeSeries<K> {
    fn default() -> Self {
        Self::empty()
    }
}
