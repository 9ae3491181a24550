//! Shared helpers for candle series normalization.

use std::collections::{BTreeMap, btree_map::Entry};

use chrono::{DateTime, Utc};

use crate::{Candle, CandleSeries};

/// Order candles by `date_time`, keeping the first candle seen for each
/// timestamp.
///
/// Returns the strictly ascending series and the number of duplicates
/// dropped. Input order only decides which duplicate wins; out-of-order
/// rows are kept.
#[must_use]
pub fn dedup_first_wins<I>(candles: I) -> (CandleSeries, usize)
where
    I: IntoIterator<Item = Candle>,
{
    let mut by_ts: BTreeMap<DateTime<Utc>, Candle> = BTreeMap::new();
    let mut dropped = 0;
    for c in candles {
        match by_ts.entry(c.date_time) {
            Entry::Vacant(v) => {
                v.insert(c);
            }
            Entry::Occupied(_) => dropped += 1,
        }
    }
    let mut series = CandleSeries::new();
    for c in by_ts.into_values() {
        series.push_after(c);
    }
    (series, dropped)
}
