//! Trading signal emitted by the classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete mean-reversion action for a single bar.
///
/// Every classified bar carries exactly one of these; there is no
/// "undefined" signal. Bars without enough history for bands are `Hold`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}
