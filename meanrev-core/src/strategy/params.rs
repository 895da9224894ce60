//! Strategy parameters and their validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameter validation failures. Surfaced to the caller at entry; the
/// pipeline never fails mid-sequence.
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("invalid period: must be >= 1, got {0}")]
    InvalidPeriod(usize),

    #[error("invalid deviation multiplier: must be positive and finite, got {0}")]
    InvalidMultiplier(f64),
}

/// Bollinger Bands strategy parameters.
///
/// Immutable for the duration of a run; consumed by value by the rolling
/// statistics engine and the band calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyParams {
    /// Rolling window length in bars.
    pub period: usize,
    /// Band half-width in standard deviations.
    pub deviation_multiplier: f64,
}

impl StrategyParams {
    pub fn new(period: usize, deviation_multiplier: f64) -> Self {
        Self {
            period,
            deviation_multiplier,
        }
    }

    /// Check both parameters; the first violation wins.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.period == 0 {
            return Err(ParamsError::InvalidPeriod(self.period));
        }
        if !(self.deviation_multiplier.is_finite() && self.deviation_multiplier > 0.0) {
            return Err(ParamsError::InvalidMultiplier(self.deviation_multiplier));
        }
        Ok(())
    }
}

impl Default for StrategyParams {
    /// The classic Bollinger setup: 20 bars, 2 standard deviations.
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}
