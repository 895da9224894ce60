//! Mean-reversion strategy: parameter validation, the annotation pipeline,
//! and the latest-signal accessor.
//!
//! Parameters are plain values passed into free functions. There is no
//! shared strategy object, so multiple parameter sets can run side by side
//! in the same process.

pub mod bollinger;
pub mod params;

pub use bollinger::{annotate, classify, latest_signal};
pub use params::{ParamsError, StrategyParams};
