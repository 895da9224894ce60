//! Bollinger Bands — rolling mean +/- standard deviation multiplier.
//!
//! - Upper: mean + mult * stddev
//! - Lower: mean - mult * stddev
//!
//! Elementwise over the precomputed statistics series; NaN inputs yield NaN
//! outputs (no default substitution).

/// Compute the upper and lower band series from the rolling statistics.
///
/// `means` and `stddevs` must be the same length (they come out of
/// `RollingStats::compute` as parallel series). Pure and total over defined
/// inputs.
pub fn bands(means: &[f64], stddevs: &[f64], multiplier: f64) -> (Vec<f64>, Vec<f64>) {
    debug_assert_eq!(means.len(), stddevs.len());
    let upper = means
        .iter()
        .zip(stddevs)
        .map(|(m, s)| m + multiplier * s)
        .collect();
    let lower = means
        .iter()
        .zip(stddevs)
        .map(|(m, s)| m - multiplier * s)
        .collect();
    (upper, lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn bands_are_symmetric_around_mean() {
        let means = [11.0, 12.0, 13.0];
        let stddevs = [0.5, 1.0, 2.0];
        let (upper, lower) = bands(&means, &stddevs, 2.0);

        for i in 0..3 {
            let half_width = upper[i] - means[i];
            assert_approx(means[i] - lower[i], half_width, DEFAULT_EPSILON);
            assert_approx(half_width, 2.0 * stddevs[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn zero_stddev_collapses_bands_onto_mean() {
        let (upper, lower) = bands(&[100.0], &[0.0], 2.0);
        assert_approx(upper[0], 100.0, DEFAULT_EPSILON);
        assert_approx(lower[0], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn nan_stats_give_nan_bands() {
        let (upper, lower) = bands(&[f64::NAN, 10.0], &[f64::NAN, f64::NAN], 2.0);
        assert!(upper[0].is_nan() && lower[0].is_nan());
        assert!(upper[1].is_nan() && lower[1].is_nan());
    }

    #[test]
    fn empty_input_empty_output() {
        let (upper, lower) = bands(&[], &[], 2.0);
        assert!(upper.is_empty());
        assert!(lower.is_empty());
    }
}
