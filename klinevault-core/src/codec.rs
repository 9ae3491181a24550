//! Row codec for the vendor's headerless kline CSV and for the canonical
//! CSV export.
//!
//! Raw column order (12 fields):
//! `date_time, open, high, low, close, volume, close_date_time,
//! quote_volume, trades_count, taker_buy_base_volume,
//! taker_buy_quote_volume, ignore`.

use std::io;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Deserialize;

use crate::locator::ArchiveLocator;
use crate::{CANONICAL_COLUMNS, Candle, CandleSeries, InstrumentType, VaultError};

/// Number of fields in one raw kline record.
pub const RAW_FIELD_COUNT: usize = 12;

/// Spot archives dated in or after this year carry microsecond epochs.
pub const SPOT_MICROSECOND_FROM_YEAR: i32 = 2025;

/// Unit of the epoch integers in a chunk's timestamp columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpochUnit {
    /// Milliseconds since the Unix epoch.
    Millis,
    /// Microseconds since the Unix epoch.
    Micros,
}

impl EpochUnit {
    /// Unit used by the chunk nominally dated `date`.
    ///
    /// Spot chunks dated on or after 2025-01-01 use microseconds; all other
    /// chunks use milliseconds. The rule applies to the whole chunk, never
    /// per row.
    #[must_use]
    pub fn for_chunk(instrument_type: InstrumentType, date: NaiveDate) -> Self {
        if instrument_type == InstrumentType::Spot && date.year() >= SPOT_MICROSECOND_FROM_YEAR {
            Self::Micros
        } else {
            Self::Millis
        }
    }

    /// Convert a raw epoch integer to an instant.
    #[must_use]
    pub fn decode(self, raw: i64) -> Option<DateTime<Utc>> {
        match self {
            Self::Millis => DateTime::from_timestamp_millis(raw),
            Self::Micros => DateTime::from_timestamp_micros(raw),
        }
    }

    /// Convert an instant to a raw epoch integer in this unit.
    #[must_use]
    pub fn encode(self, at: DateTime<Utc>) -> i64 {
        match self {
            Self::Millis => at.timestamp_millis(),
            Self::Micros => at.timestamp_micros(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawKline(
    i64,
    Option<f64>,
    Option<f64>,
    Option<f64>,
    Option<f64>,
    Option<f64>,
    i64,
    Option<f64>,
    Option<i64>,
    Option<f64>,
    Option<f64>,
    #[allow(dead_code)] Option<String>,
);

/// First field of the vendor's optional header line.
const HEADER_FIRST_FIELD: &str = "open_time";

fn is_header(record: &StringRecord) -> bool {
    record
        .get(0)
        .is_some_and(|f| f.trim().eq_ignore_ascii_case(HEADER_FIRST_FIELD))
}

/// Decode one chunk's row file into candles, in file order.
///
/// A leading vendor header line (`open_time,...`) is tolerated and skipped.
/// Every other record, the first included, must carry exactly
/// [`RAW_FIELD_COUNT`] fields of the expected types.
///
/// # Errors
/// Returns `CorruptArchive` naming `locator` and the offending line when a
/// record has the wrong shape, a field fails to parse, or an epoch is out
/// of range.
pub fn decode_klines(
    bytes: &[u8],
    locator: &ArchiveLocator,
    unit: EpochUnit,
) -> Result<Vec<Candle>, VaultError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut out = Vec::new();
    let mut record = StringRecord::new();
    let mut line: u64 = 0;
    loop {
        let more = reader
            .read_record(&mut record)
            .map_err(|e| VaultError::corrupt(locator.to_string(), e.to_string()))?;
        if !more {
            break;
        }
        line += 1;
        if line == 1 && is_header(&record) {
            continue;
        }
        if record.len() != RAW_FIELD_COUNT {
            return Err(VaultError::corrupt(
                locator.to_string(),
                format!(
                    "line {line}: expected {RAW_FIELD_COUNT} fields, found {}",
                    record.len()
                ),
            ));
        }
        let raw: RawKline = record
            .deserialize(None)
            .map_err(|e| VaultError::corrupt(locator.to_string(), format!("line {line}: {e}")))?;
        out.push(to_candle(&raw, unit).ok_or_else(|| {
            VaultError::corrupt(
                locator.to_string(),
                format!("line {line}: epoch out of range"),
            )
        })?);
    }
    Ok(out)
}

fn to_candle(raw: &RawKline, unit: EpochUnit) -> Option<Candle> {
    Some(Candle {
        date_time: unit.decode(raw.0)?,
        open: raw.1,
        high: raw.2,
        low: raw.3,
        close: raw.4,
        volume: raw.5,
        close_date_time: Some(unit.decode(raw.6)?),
        quote_volume: raw.7,
        trades_count: raw.8,
        taker_buy_base_volume: raw.9,
        taker_buy_quote_volume: raw.10,
    })
}

fn cell<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Write `series` as CSV with a header row in canonical column order.
///
/// Instants are written as epoch microseconds; nulls as empty cells.
///
/// # Errors
/// Returns `Store` if the underlying writer fails.
pub fn write_canonical_csv<W: io::Write>(series: &CandleSeries, out: W) -> Result<(), VaultError> {
    let err = |e: csv::Error| VaultError::store("csv-export", e.to_string());
    let mut w = WriterBuilder::new().has_headers(false).from_writer(out);
    w.write_record(CANONICAL_COLUMNS).map_err(err)?;
    for c in series {
        w.write_record([
            c.date_time.timestamp_micros().to_string(),
            cell(c.open),
            cell(c.high),
            cell(c.low),
            cell(c.close),
            cell(c.volume),
            cell(c.close_date_time.map(|t| t.timestamp_micros())),
            cell(c.quote_volume),
            cell(c.trades_count),
            cell(c.taker_buy_base_volume),
            cell(c.taker_buy_quote_volume),
        ])
        .map_err(err)?;
    }
    w.flush()
        .map_err(|e| VaultError::store("csv-export", e.to_string()))
}
