//! TOML configuration for the CLI.
//!
//! Every section and field is optional in the file; missing values fall back
//! to the built-in defaults (EURUSD, M30, 20-bar window, 2 standard
//! deviations). Command-line flags override file values.

use std::path::Path;

use anyhow::{Context, Result};
use meanrev_core::strategy::StrategyParams;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub strategy: StrategySection,
    pub market: MarketSection,
    pub api: ApiSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategySection {
    pub period: usize,
    pub deviation_multiplier: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketSection {
    pub symbol: String,
    pub timeframe: String,
    /// Fetch window: how many hours of history to request, ending now.
    pub hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiSection {
    pub host: String,
}

impl Default for StrategySection {
    fn default() -> Self {
        let params = StrategyParams::default();
        Self {
            period: params.period,
            deviation_multiplier: params.deviation_multiplier,
        }
    }
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            symbol: "EURUSD".into(),
            timeframe: "M30".into(),
            hours: 48,
        }
    }
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            host: "metasyc.p.rapidapi.com".into(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            strategy: StrategySection::default(),
            market: MarketSection::default(),
            api: ApiSection::default(),
        }
    }
}

impl AppConfig {
    /// Load from a TOML file, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn params(&self) -> StrategyParams {
        StrategyParams::new(self.strategy.period, self.strategy.deviation_multiplier)
    }
}
