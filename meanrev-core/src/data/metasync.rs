//! Metasync (RapidAPI) market data provider.
//!
//! Fetches intraday OHLC bars from the `/ohlc` endpoint and the current
//! quote from `/tick`. Handles retries with exponential backoff, the
//! provider's string-or-number field encoding, and ascending sort of the
//! returned bars. The CSV import path is the offline alternative.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

use super::provider::{DataError, OhlcProvider};
use crate::domain::Bar;

/// Timestamp format the API expects in query params and uses in responses.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Connection settings for the Metasync API.
#[derive(Debug, Clone)]
pub struct MetasyncSettings {
    /// RapidAPI host, e.g. "metasyc.p.rapidapi.com".
    pub host: String,
    /// RapidAPI key; an empty key makes the provider unavailable.
    pub api_key: String,
}

/// A numeric field that may arrive as a JSON number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumericField::Number(n) => Some(*n),
            NumericField::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One OHLC row from the `/ohlc` endpoint.
#[derive(Debug, Deserialize)]
struct OhlcRow {
    time: String,
    open: NumericField,
    high: NumericField,
    low: NumericField,
    close: NumericField,
}

/// Current quote from the `/tick` endpoint.
#[derive(Debug, Deserialize)]
struct TickRow {
    time: String,
    bid: NumericField,
    ask: NumericField,
}

/// Parsed current quote.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub timestamp: DateTime<Utc>,
    pub bid: f64,
    pub ask: f64,
}

/// Metasync data provider (blocking HTTP).
pub struct MetasyncClient {
    client: reqwest::blocking::Client,
    settings: MetasyncSettings,
    max_retries: u32,
    base_delay: Duration,
}

impl MetasyncClient {
    pub fn new(settings: MetasyncSettings) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            settings,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        })
    }

    /// Build the `/ohlc` URL for a symbol, timeframe, and time range.
    fn ohlc_url(&self, symbol: &str, timeframe: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
        format!(
            "https://{}/ohlc?symbol={symbol}&timeframe={timeframe}\
             &date_from={}&date_to={}",
            self.settings.host,
            start.format(TIME_FORMAT),
            end.format(TIME_FORMAT),
        )
    }

    fn tick_url(&self, symbol: &str) -> String {
        format!("https://{}/tick?symbol={symbol}", self.settings.host)
    }

    fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(raw.trim(), TIME_FORMAT)
            .ok()
            .map(|dt| dt.and_utc())
    }

    /// Turn raw rows into a sorted bar sequence.
    ///
    /// Rows with unparseable timestamps or numerics are dropped here — the
    /// engine downstream assumes finite values. The sort is stable, so rows
    /// sharing a timestamp keep their feed order.
    fn parse_rows(symbol: &str, rows: Vec<OhlcRow>) -> Result<Vec<Bar>, DataError> {
        let mut bars: Vec<Bar> = rows
            .into_iter()
            .filter_map(|row| {
                let bar = Bar {
                    timestamp: Self::parse_time(&row.time)?,
                    open: row.open.as_f64()?,
                    high: row.high.as_f64()?,
                    low: row.low.as_f64()?,
                    close: row.close.as_f64()?,
                };
                bar.is_finite().then_some(bar)
            })
            .collect();

        if bars.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        bars.sort_by_key(|b| b.timestamp);
        Ok(bars)
    }

    /// Execute a GET with retry/backoff and map HTTP failures to DataError.
    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, DataError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
            }

            let request = self
                .client
                .get(url)
                .header("x-rapidapi-key", &self.settings.api_key)
                .header("x-rapidapi-host", &self.settings.host);

            match request.send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::UNAUTHORIZED
                        || status == reqwest::StatusCode::FORBIDDEN
                    {
                        // Bad or inactive key; retrying cannot help.
                        return Err(DataError::AuthenticationRequired(format!(
                            "provider rejected the API key (HTTP {status})"
                        )));
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if !status.is_success() {
                        last_error = Some(DataError::Other(format!("HTTP {status}")));
                        continue;
                    }

                    return resp.json().map_err(|e| {
                        DataError::ResponseFormatChanged(format!("failed to parse response: {e}"))
                    });
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }

    /// Fetch the current quote for a symbol.
    pub fn current_tick(&self, symbol: &str) -> Result<Tick, DataError> {
        let row: TickRow = self.get_json(&self.tick_url(symbol))?;
        let timestamp = Self::parse_time(&row.time).ok_or_else(|| {
            DataError::ResponseFormatChanged(format!("invalid tick time: {}", row.time))
        })?;
        let bid = row
            .bid
            .as_f64()
            .ok_or_else(|| DataError::ResponseFormatChanged("unparseable bid".into()))?;
        let ask = row
            .ask
            .as_f64()
            .ok_or_else(|| DataError::ResponseFormatChanged("unparseable ask".into()))?;
        Ok(Tick {
            timestamp,
            bid,
            ask,
        })
    }
}

impl OhlcProvider for MetasyncClient {
    fn name(&self) -> &str {
        "metasync"
    }

    fn fetch(
        &self,
        symbol: &str,
        timeframe: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, DataError> {
        let rows: Vec<OhlcRow> = self.get_json(&self.ohlc_url(symbol, timeframe, start, end))?;
        Self::parse_rows(symbol, rows)
    }

    fn is_available(&self) -> bool {
        !self.settings.api_key.is_empty()
    }
}
