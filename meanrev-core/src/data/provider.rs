//! Data provider trait and structured error types.
//!
//! The OhlcProvider trait abstracts over bar sources (HTTP feed, CSV import)
//! so we can swap implementations and mock for tests.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::Bar;

/// Structured error types for data operations.
///
/// These never reach the signal engine; they surface at the CLI boundary.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("csv error: {0}")]
    Csv(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for OHLC bar providers.
///
/// Implementations must return bars sorted ascending by timestamp with all
/// OHLC fields finite; rows that fail numeric parsing are dropped before the
/// sequence is handed over. Retries belong here, never downstream.
pub trait OhlcProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch bars for a symbol and timeframe over a time range.
    fn fetch(
        &self,
        symbol: &str,
        timeframe: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, DataError>;

    /// Check if the provider is currently usable (e.g., credentials present).
    fn is_available(&self) -> bool;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// In-memory provider for tests.
    pub struct StaticProvider {
        pub bars: Vec<Bar>,
    }

    impl OhlcProvider for StaticProvider {
        fn name(&self) -> &str {
            "static"
        }

        fn fetch(
            &self,
            _symbol: &str,
            _timeframe: &str,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<Vec<Bar>, DataError> {
            Ok(self
                .bars
                .iter()
                .filter(|b| b.timestamp >= start && b.timestamp <= end)
                .cloned()
                .collect())
        }

        fn is_available(&self) -> bool {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::StaticProvider;
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn static_provider_filters_by_range() {
        let bars = make_bars(&[1.0, 2.0, 3.0, 4.0]);
        let provider = StaticProvider { bars: bars.clone() };
        let fetched = provider
            .fetch("EURUSD", "M30", bars[1].timestamp, bars[2].timestamp)
            .unwrap();
        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched[0].close, 2.0);
    }

    #[test]
    fn errors_render_for_the_status_line() {
        let err = DataError::RateLimited {
            retry_after_secs: 60,
        };
        assert_eq!(
            err.to_string(),
            "rate limited by provider (retry after 60s)"
        );
    }
}
