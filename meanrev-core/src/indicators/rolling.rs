//! Rolling mean and standard deviation of the close series.
//!
//! For each index i the window is the `period` closes ending at i,
//! inclusive. Indices with fewer than `period` bars of history get NaN.
//!
//! Uses population stddev (divide by N).
//! Lookback: period - 1.

use crate::domain::Bar;

/// Rolling mean/stddev engine over close prices.
#[derive(Debug, Clone)]
pub struct RollingStats {
    period: usize,
}

impl RollingStats {
    /// `period` must be >= 1; callers validate via `StrategyParams` and this
    /// asserts the same contract.
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "rolling period must be >= 1");
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Number of bars needed before the first defined output.
    pub fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    /// Compute the mean and stddev series for the entire bar sequence.
    ///
    /// Returns two `Vec<f64>` of the same length as `bars`. The first
    /// `lookback()` values are `f64::NAN`, as is any index whose window
    /// contains a NaN close (NaN propagates, never coerced to zero).
    pub fn compute(&self, bars: &[Bar]) -> (Vec<f64>, Vec<f64>) {
        let n = bars.len();
        let mut means = vec![f64::NAN; n];
        let mut stddevs = vec![f64::NAN; n];

        if n < self.period {
            return (means, stddevs);
        }

        for i in (self.period - 1)..n {
            let start = i + 1 - self.period;
            let window = &bars[start..=i];

            let mut has_nan = false;
            let mut sum = 0.0;
            for bar in window {
                if bar.close.is_nan() {
                    has_nan = true;
                    break;
                }
                sum += bar.close;
            }
            if has_nan {
                continue;
            }

            let mean = sum / self.period as f64;
            let variance: f64 = window
                .iter()
                .map(|bar| {
                    let diff = bar.close - mean;
                    diff * diff
                })
                .sum::<f64>()
                / self.period as f64;

            means[i] = mean;
            stddevs[i] = variance.sqrt();
        }

        (means, stddevs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn mean_3_basic() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let (means, _) = RollingStats::new(3).compute(&bars);

        assert!(means[0].is_nan());
        assert!(means[1].is_nan());
        // mean(10,11,12) = 11.0
        assert_approx(means[2], 11.0, DEFAULT_EPSILON);
        // mean(11,12,13) = 12.0
        assert_approx(means[3], 12.0, DEFAULT_EPSILON);
        assert_approx(means[4], 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn stddev_is_population() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let (_, stddevs) = RollingStats::new(3).compute(&bars);
        // population std of [1,2,3]: sqrt(2/3) = 0.8165
        assert_approx(stddevs[2], (2.0f64 / 3.0).sqrt(), DEFAULT_EPSILON);
    }

    #[test]
    fn constant_closes_have_zero_stddev() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0]);
        let (means, stddevs) = RollingStats::new(3).compute(&bars);
        assert_approx(means[2], 100.0, DEFAULT_EPSILON);
        assert_approx(stddevs[2], 0.0, DEFAULT_EPSILON);
        assert_approx(stddevs[3], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn period_1_stats_collapse_to_close() {
        let bars = make_bars(&[100.0, 200.0, 300.0]);
        let (means, stddevs) = RollingStats::new(1).compute(&bars);
        for (i, bar) in bars.iter().enumerate() {
            assert_approx(means[i], bar.close, DEFAULT_EPSILON);
            assert_approx(stddevs[i], 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn nan_close_propagates_through_windows() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        bars[2].close = f64::NAN;
        let (means, stddevs) = RollingStats::new(3).compute(&bars);
        // every window containing index 2 is NaN
        assert!(means[2].is_nan() && stddevs[2].is_nan());
        assert!(means[3].is_nan() && stddevs[3].is_nan());
        assert!(means[4].is_nan() && stddevs[4].is_nan());
        // first clean window again at index 5: [13,14,15]
        assert_approx(means[5], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn too_few_bars_all_nan() {
        let bars = make_bars(&[10.0, 11.0]);
        let (means, stddevs) = RollingStats::new(5).compute(&bars);
        assert!(means.iter().all(|v| v.is_nan()));
        assert!(stddevs.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn empty_input_empty_output() {
        let (means, stddevs) = RollingStats::new(3).compute(&[]);
        assert!(means.is_empty());
        assert!(stddevs.is_empty());
    }

    #[test]
    fn lookback() {
        assert_eq!(RollingStats::new(20).lookback(), 19);
        assert_eq!(RollingStats::new(1).lookback(), 0);
    }

    #[test]
    #[should_panic(expected = "rolling period must be >= 1")]
    fn zero_period_panics() {
        RollingStats::new(0);
    }
}
