//! Indicator engine — evaluates a set of indicators over instruments.
//!
//! The engine holds an immutable list of indicators and evaluates them per
//! instrument. Panels over many instruments are evaluated in parallel; the
//! indicators are stateless, so every worker shares the same instances.

use std::collections::{BTreeMap, HashSet};
use std::io::Write;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ConfigError, EngineConfig};
use crate::indicators::{Indicator, IndicatorKind};
use crate::series::TimeSeries;

/// Training output of every indicator for one instrument.
#[derive(Debug, Clone)]
pub struct FeatureFrame {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    /// `(indicator name, series)` in engine order. Each series shares `dates`.
    pub columns: Vec<(String, TimeSeries)>,
}

impl FeatureFrame {
    pub fn column(&self, name: &str) -> Option<&TimeSeries> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// Write `date,symbol,<indicator...>` rows. The header is written only
    /// when `header` is true so several frames can share one file.
    pub fn write_csv<W: Write>(&self, writer: &mut csv::Writer<W>, header: bool) -> csv::Result<()> {
        if header {
            let mut record = vec!["date".to_string(), "symbol".to_string()];
            record.extend(self.columns.iter().map(|(n, _)| n.clone()));
            writer.write_record(&record)?;
        }
        for (i, date) in self.dates.iter().enumerate() {
            let mut record = vec![date.to_string(), self.symbol.clone()];
            record.extend(self.columns.iter().map(|(_, s)| s.values()[i].to_string()));
            writer.write_record(&record)?;
        }
        Ok(())
    }
}

/// Latest value of every indicator for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestValues {
    pub symbol: String,
    pub date: Option<NaiveDate>,
    pub values: BTreeMap<String, f64>,
}

#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    indicators: Vec<IndicatorKind>,
}

impl IndicatorEngine {
    /// Build an engine. Indicators with a name already seen are dropped.
    pub fn new(indicators: Vec<IndicatorKind>) -> Self {
        let mut seen = HashSet::new();
        let indicators: Vec<IndicatorKind> = indicators
            .into_iter()
            .filter(|ind| {
                let fresh = seen.insert(ind.name().to_string());
                if !fresh {
                    debug!(indicator = ind.name(), "dropping duplicate indicator");
                }
                fresh
            })
            .collect();
        Self { indicators }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.build_indicators()?))
    }

    pub fn indicators(&self) -> &[IndicatorKind] {
        &self.indicators
    }

    /// History needed for every indicator to be defined.
    pub fn min_window_size(&self) -> usize {
        self.indicators
            .iter()
            .map(|ind| ind.min_window_size())
            .max()
            .unwrap_or(0)
    }

    pub fn training(&self, symbol: &str, log_price: &TimeSeries) -> FeatureFrame {
        let columns = self
            .indicators
            .iter()
            .map(|ind| (ind.name().to_string(), ind.training(log_price)))
            .collect();
        FeatureFrame {
            symbol: symbol.to_string(),
            dates: log_price.index().to_vec(),
            columns,
        }
    }

    /// Latest values, computed on the trailing `min_window_size()` observations.
    pub fn latest(&self, symbol: &str, log_price: &TimeSeries) -> LatestValues {
        let needed = self.min_window_size();
        if log_price.len() < needed {
            warn!(
                symbol,
                available = log_price.len(),
                needed,
                "short history, latest values fall back to fill values"
            );
        }
        let window = log_price.tail(needed);
        let values = self
            .indicators
            .iter()
            .map(|ind| (ind.name().to_string(), ind.last(&window)))
            .collect();
        LatestValues {
            symbol: symbol.to_string(),
            date: log_price.last_key().copied(),
            values,
        }
    }

    pub fn training_panel(&self, series: &BTreeMap<String, TimeSeries>) -> Vec<FeatureFrame> {
        debug!(instruments = series.len(), "evaluating training panel");
        let entries: Vec<(&String, &TimeSeries)> = series.iter().collect();
        entries
            .par_iter()
            .map(|(symbol, s)| self.training(symbol, s))
            .collect()
    }

    pub fn latest_panel(&self, series: &BTreeMap<String, TimeSeries>) -> Vec<LatestValues> {
        debug!(instruments = series.len(), "evaluating latest panel");
        let entries: Vec<(&String, &TimeSeries)> = series.iter().collect();
        entries
            .par_iter()
            .map(|(symbol, s)| self.latest(symbol, s))
            .collect()
    }
}
