//! Bollinger Bands mean-reversion pipeline.
//!
//! `annotate` runs the whole chain — rolling statistics, bands, per-bar
//! classification — and returns a new annotated sequence. The input bars are
//! never touched, so callers may reuse them across parameter sets.
//!
//! Classification is stateless per bar: no smoothing, no de-duplication of
//! consecutive same-direction signals.

use crate::domain::{AnnotatedBar, Bar, Signal};
use crate::indicators::{bands, RollingStats};

use super::{ParamsError, StrategyParams};

/// Classify a single bar's close against its bands.
///
/// Undefined (NaN) bands mean insufficient history: `Hold`. The lower-band
/// test runs first, so when stddev = 0 collapses both bands onto the close,
/// `Buy` wins the tie.
pub fn classify(close: f64, upper_band: f64, lower_band: f64) -> Signal {
    if upper_band.is_nan() || lower_band.is_nan() {
        return Signal::Hold;
    }
    if close <= lower_band {
        Signal::Buy
    } else if close >= upper_band {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Run the full annotation pipeline over a bar sequence.
///
/// Validates parameters up front (`ParamsError` is the only failure mode),
/// then computes rolling statistics, bands, and signals in one forward pass.
/// An empty sequence yields an empty annotated sequence.
pub fn annotate(bars: &[Bar], params: &StrategyParams) -> Result<Vec<AnnotatedBar>, ParamsError> {
    params.validate()?;

    let (means, stddevs) = RollingStats::new(params.period).compute(bars);
    let (upper, lower) = bands(&means, &stddevs, params.deviation_multiplier);

    let annotated = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| AnnotatedBar {
            bar: bar.clone(),
            rolling_mean: means[i],
            rolling_stddev: stddevs[i],
            upper_band: upper[i],
            lower_band: lower[i],
            signal: classify(bar.close, upper[i], lower[i]),
        })
        .collect();

    Ok(annotated)
}

/// Most recent signal and its bar, for the status-line report.
///
/// `(Hold, None)` on an empty sequence — "no data yet" is a valid steady
/// state for a polling caller, not an error.
pub fn latest_signal(annotated: &[AnnotatedBar]) -> (Signal, Option<&AnnotatedBar>) {
    match annotated.last() {
        Some(bar) => (bar.signal, Some(bar)),
        None => (Signal::Hold, None),
    }
}
