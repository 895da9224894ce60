//! MeanRev Core — Bollinger Bands mean-reversion signal engine.
//!
//! This crate contains the heart of the signal pipeline:
//! - Domain types (bars, annotated bars, signals)
//! - Rolling statistics over the close series (windowed mean/stddev)
//! - Band calculation (mean ± multiplier × stddev)
//! - Per-bar signal classification and latest-signal reporting
//! - Data providers (HTTP OHLC client, CSV import/export)
//!
//! The pipeline is a pure in-memory transformation: bars in, a new annotated
//! sequence out. The input sequence is never mutated, so callers may reuse it.

pub mod data;
pub mod domain;
pub mod indicators;
pub mod strategy;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types are Send + Sync.
    ///
    /// The engine holds no cross-call state, so independent callers may run
    /// concurrently with their own inputs. This breaks the build immediately
    /// if any type loses that property.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::AnnotatedBar>();
        require_sync::<domain::AnnotatedBar>();
        require_send::<domain::Signal>();
        require_sync::<domain::Signal>();

        require_send::<strategy::StrategyParams>();
        require_sync::<strategy::StrategyParams>();

        require_send::<indicators::RollingStats>();
        require_sync::<indicators::RollingStats>();

        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<data::MetasyncClient>();
        require_sync::<data::MetasyncClient>();
    }
}
