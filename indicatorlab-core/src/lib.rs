//! IndicatorLab Core — time series primitives and technical indicators.
//!
//! This crate contains:
//! - `TimeSeries`: date-keyed numeric series with shift, rolling windows,
//!   fill, reindex and key-aligned arithmetic
//! - The sealed `Indicator` contract with RSI and Shifts policies
//! - The factory resolving indicator names and parameters
//! - Observation ingestion (CSV → per-instrument log-price series)
//! - `IndicatorEngine`, evaluating indicator sets over many instruments

pub mod config;
pub mod data;
pub mod engine;
pub mod factory;
pub mod indicators;
pub mod series;

pub use config::{ConfigError, EngineConfig};
pub use engine::{FeatureFrame, IndicatorEngine, LatestValues};
pub use factory::{create_indicator, from_configs, from_names, ConfigurationError, IndicatorConfig};
pub use indicators::{Indicator, IndicatorKind, RsiIndicator, ShiftsIndicator};
pub use series::{SeriesError, TimeSeries};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: indicators and series can be shared across threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<TimeSeries>();
        require_sync::<TimeSeries>();
        require_send::<RsiIndicator>();
        require_sync::<RsiIndicator>();
        require_send::<ShiftsIndicator>();
        require_sync::<ShiftsIndicator>();
        require_send::<IndicatorKind>();
        require_sync::<IndicatorKind>();
        require_send::<IndicatorEngine>();
        require_sync::<IndicatorEngine>();
        require_send::<EngineConfig>();
        require_sync::<EngineConfig>();
    }

    /// One indicator instance evaluated from several threads at once.
    #[test]
    fn shared_indicator_across_threads() {
        let rsi = std::sync::Arc::new(IndicatorKind::from(RsiIndicator::new(3).unwrap()));
        let prices = indicators::make_series(&[0.0, 0.2, 0.1, 0.3, 0.25, 0.4]);
        let expected = rsi.training(&prices);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let rsi = std::sync::Arc::clone(&rsi);
                let prices = prices.clone();
                std::thread::spawn(move || rsi.training(&prices))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().values(), expected.values());
        }
        assert_eq!(prices.missing_count(), 0);
    }
}
