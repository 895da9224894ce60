//! CSV import of bars and export of annotated sequences.
//!
//! Import is the offline alternative to the HTTP provider and honors the
//! same contract: finite values only, sorted ascending by timestamp. Export
//! is the hand-off to external charting — bands and signal as columns, with
//! undefined values written as empty fields rather than "NaN".

use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::provider::DataError;
use crate::domain::{AnnotatedBar, Bar, Signal};

/// Read bars from headered CSV (`timestamp,open,high,low,close`, RFC 3339
/// timestamps).
///
/// Rows with non-finite OHLC values are dropped; the result is stable-sorted
/// ascending, so rows sharing a timestamp keep file order. Malformed rows
/// (unparseable timestamp or numeric) fail the whole read — a broken file
/// should be noticed, not silently thinned.
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<Bar>, DataError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut bars = Vec::new();

    for record in csv_reader.deserialize::<Bar>() {
        let bar = record.map_err(|e| DataError::Csv(e.to_string()))?;
        if bar.is_finite() {
            bars.push(bar);
        }
    }

    bars.sort_by_key(|b| b.timestamp);
    Ok(bars)
}

/// Output row for the annotated export. Undefined derived values serialize
/// as empty fields via `Option`.
#[derive(Serialize)]
struct AnnotatedRecord {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    rolling_mean: Option<f64>,
    rolling_stddev: Option<f64>,
    upper_band: Option<f64>,
    lower_band: Option<f64>,
    signal: Signal,
}

fn defined(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Write an annotated sequence as CSV for the charting collaborator.
pub fn write_annotated<W: Write>(writer: W, annotated: &[AnnotatedBar]) -> Result<(), DataError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for ab in annotated {
        let record = AnnotatedRecord {
            timestamp: ab.bar.timestamp,
            open: ab.bar.open,
            high: ab.bar.high,
            low: ab.bar.low,
            close: ab.bar.close,
            rolling_mean: defined(ab.rolling_mean),
            rolling_stddev: defined(ab.rolling_stddev),
            upper_band: defined(ab.upper_band),
            lower_band: defined(ab.lower_band),
            signal: ab.signal,
        };
        csv_writer
            .serialize(record)
            .map_err(|e| DataError::Csv(e.to_string()))?;
    }

    csv_writer.flush().map_err(|e| DataError::Csv(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{annotate, StrategyParams};

    const SAMPLE: &str = "\
timestamp,open,high,low,close
2024-01-02T09:00:00Z,1.0920,1.0955,1.0910,1.0940
2024-01-02T09:30:00Z,1.0940,1.0960,1.0930,1.0950
2024-01-02T10:00:00Z,1.0950,1.0970,1.0940,1.0960
";

    #[test]
    fn read_bars_parses_and_keeps_order() {
        let bars = read_bars(SAMPLE.as_bytes()).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].close, 1.0940);
        assert!(crate::domain::bar::is_sorted_ascending(&bars));
    }

    #[test]
    fn read_bars_sorts_out_of_order_rows() {
        let csv = "\
timestamp,open,high,low,close
2024-01-02T10:00:00Z,3.0,4.0,2.0,3.0
2024-01-02T09:00:00Z,1.0,2.0,0.5,1.0
";
        let bars = read_bars(csv.as_bytes()).unwrap();
        assert_eq!(bars[0].close, 1.0);
        assert_eq!(bars[1].close, 3.0);
    }

    #[test]
    fn read_bars_drops_non_finite_rows() {
        let csv = "\
timestamp,open,high,low,close
2024-01-02T09:00:00Z,1.0,2.0,0.5,NaN
2024-01-02T09:30:00Z,1.0,2.0,0.5,1.5
";
        let bars = read_bars(csv.as_bytes()).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 1.5);
    }

    #[test]
    fn read_bars_rejects_malformed_rows() {
        let csv = "\
timestamp,open,high,low,close
2024-01-02T09:00:00Z,1.0,2.0,0.5,not-a-number
";
        assert!(matches!(
            read_bars(csv.as_bytes()),
            Err(DataError::Csv(_))
        ));
    }

    #[test]
    fn read_bars_empty_file_is_empty_sequence() {
        let bars = read_bars("timestamp,open,high,low,close\n".as_bytes()).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn annotated_export_blanks_warmup_fields() {
        let bars = read_bars(SAMPLE.as_bytes()).unwrap();
        let annotated = annotate(&bars, &StrategyParams::new(2, 2.0)).unwrap();

        let mut out = Vec::new();
        write_annotated(&mut out, &annotated).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4); // header + 3 rows
        assert!(lines[0].ends_with("rolling_mean,rolling_stddev,upper_band,lower_band,signal"));
        // warmup row: empty derived fields, HOLD signal
        assert!(lines[1].contains(",,,,HOLD"));
        // defined row carries band values
        assert!(!lines[2].contains(",,,,"));
    }
}
