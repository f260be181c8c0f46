//! Engine configuration loaded from TOML.
//!
//! ```toml
//! price_transform = "log"
//!
//! [[indicators]]
//! type = "rsi"
//! params = { period = 14 }
//!
//! [[indicators]]
//! type = "shifts"
//! params = { period = 5 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::PriceTransform;
use crate::factory::{from_configs, ConfigurationError, IndicatorConfig};
use crate::indicators::IndicatorKind;

/// Errors from loading or validating an engine config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid indicator: {0}")]
    Indicator(#[from] ConfigurationError),
    #[error("config lists no indicators")]
    Empty,
}

/// Which indicators to compute and how closes are transformed first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub price_transform: PriceTransform,
    #[serde(default)]
    pub indicators: Vec<IndicatorConfig>,
}

impl EngineConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Config with the given indicator names and log prices.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            price_transform: PriceTransform::Log,
            indicators: names
                .into_iter()
                .map(|n| IndicatorConfig::from(n.as_ref()))
                .collect(),
        }
    }

    /// Run every indicator entry through the factory.
    pub fn build_indicators(&self) -> Result<Vec<IndicatorKind>, ConfigError> {
        if self.indicators.is_empty() {
            return Err(ConfigError::Empty);
        }
        Ok(from_configs(&self.indicators)?)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_names(["rsi"])
    }
}
