//! AnnotatedBar — a bar plus its derived band values and signal.

use serde::{Deserialize, Serialize};

use super::{Bar, Signal};

/// A bar annotated with rolling statistics, band values, and the classified
/// signal.
///
/// Derived values use `f64::NAN` for "undefined" (fewer than `period` bars of
/// history, or NaN propagated from the input window). The signal is always a
/// defined enum value; bars without bands classify as `Hold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedBar {
    #[serde(flatten)]
    pub bar: Bar,
    pub rolling_mean: f64,
    pub rolling_stddev: f64,
    pub upper_band: f64,
    pub lower_band: f64,
    pub signal: Signal,
}

impl AnnotatedBar {
    /// Returns true if this bar has defined bands (enough history, no NaN
    /// in the window).
    pub fn has_bands(&self) -> bool {
        self.upper_band.is_finite() && self.lower_band.is_finite()
    }
}
