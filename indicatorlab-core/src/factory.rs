//! Factory system — converts `IndicatorConfig` into indicator instances.
//!
//! Names resolve case-insensitively. A name may carry its period as a suffix
//! in the canonical naming scheme (`rsi_21`, `shifts_5`), otherwise the
//! period comes from the `period` parameter. Shifts has no default period.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::indicators::rsi::DEFAULT_RSI_PERIOD;
use crate::indicators::{IndicatorKind, RsiIndicator, ShiftsIndicator};

// ─── Error type ──────────────────────────────────────────────────────

/// Errors that can occur during indicator construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("unknown indicator type: {0}")]
    UnknownIndicator(String),
    #[error("indicator '{indicator}' requires parameter '{param}'")]
    MissingParameter {
        indicator: String,
        param: &'static str,
    },
    #[error("indicator '{indicator}' parameter '{param}' must be a positive integer, got {value}")]
    InvalidParameter {
        indicator: String,
        param: &'static str,
        value: f64,
    },
}

// ─── Config ──────────────────────────────────────────────────────────

/// Name plus parameters of one indicator.
///
/// Uses `BTreeMap` for deterministic parameter order when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    #[serde(rename = "type")]
    pub indicator_type: String,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl IndicatorConfig {
    pub fn new(indicator_type: impl Into<String>) -> Self {
        Self {
            indicator_type: indicator_type.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}

impl From<&str> for IndicatorConfig {
    /// `"rsi"` → no params, `"shifts_5"` → `period = 5`.
    fn from(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        if let Some((base, suffix)) = name.rsplit_once('_') {
            if let Ok(period) = suffix.parse::<i64>() {
                return IndicatorConfig::new(base).with_param(PERIOD, period as f64);
            }
        }
        IndicatorConfig::new(name)
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────

const PERIOD: &str = "period";

/// Largest accepted period.
const MAX_PERIOD: f64 = u32::MAX as f64;

/// Extract a positive integral parameter, falling back to `default`.
fn param_period(
    config: &IndicatorConfig,
    indicator: &str,
    default: Option<usize>,
) -> Result<usize, ConfigurationError> {
    let Some(&value) = config.params.get(PERIOD) else {
        return default.ok_or_else(|| ConfigurationError::MissingParameter {
            indicator: indicator.to_string(),
            param: PERIOD,
        });
    };
    if !value.is_finite() || !(1.0..=MAX_PERIOD).contains(&value) || value.fract() != 0.0 {
        return Err(ConfigurationError::InvalidParameter {
            indicator: indicator.to_string(),
            param: PERIOD,
            value,
        });
    }
    Ok(value as usize)
}

fn warn_unknown_params(config: &IndicatorConfig, indicator: &str) {
    for key in config.params.keys().filter(|k| k.as_str() != PERIOD) {
        warn!(indicator, param = %key, "ignoring unrecognised indicator parameter");
    }
}

// ─── Indicator factory ───────────────────────────────────────────────

/// Create an indicator from an `IndicatorConfig`.
pub fn create_indicator(config: &IndicatorConfig) -> Result<IndicatorKind, ConfigurationError> {
    let indicator_type = config.indicator_type.trim().to_ascii_lowercase();
    let indicator = match indicator_type.as_str() {
        "rsi" => {
            let period = param_period(config, "rsi", Some(DEFAULT_RSI_PERIOD))?;
            IndicatorKind::Rsi(RsiIndicator::new(period)?)
        }
        "shifts" => {
            let period = param_period(config, "shifts", None)?;
            IndicatorKind::Shifts(ShiftsIndicator::new(period)?)
        }
        _ => return Err(ConfigurationError::UnknownIndicator(config.indicator_type.clone())),
    };
    warn_unknown_params(config, &indicator_type);
    debug!(?indicator, "indicator constructed");
    Ok(indicator)
}

/// Create one indicator per name.
pub fn from_names<I, S>(names: I) -> Result<Vec<IndicatorKind>, ConfigurationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| create_indicator(&IndicatorConfig::from(name.as_ref())))
        .collect()
}

/// Create one indicator per config.
pub fn from_configs(configs: &[IndicatorConfig]) -> Result<Vec<IndicatorKind>, ConfigurationError> {
    configs.iter().map(create_indicator).collect()
}

/// Indicator types the factory understands, with their parameters.
pub fn supported_indicators() -> &'static [(&'static str, &'static str)] {
    &[
        ("rsi", "period (default 14)"),
        ("shifts", "period (required)"),
    ]
}

// ─── Tests ───────────────────────────────────────────────────────────
