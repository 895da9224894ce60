//! Data retrieval and exchange: HTTP OHLC provider, CSV import/export.
//!
//! Everything here sits outside the signal engine. Providers deliver a
//! sorted, finite-valued bar sequence; the engine assumes that contract.

pub mod csv;
pub mod metasync;
pub mod provider;

pub use csv::{read_bars, write_annotated};
pub use metasync::{MetasyncClient, MetasyncSettings, Tick};
pub use provider::{DataError, OhlcProvider};
