//! Report envelopes produced by the loader.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attribution::Attribution;
use crate::candle::{CandleField, CandleSeries};
use crate::identity::RequestIdentity;

/// One disagreeing field at a tick where both granularities have a row.
///
/// A null on one side and a value on the other counts as a disagreement;
/// two nulls never do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    /// Tick at which the sources disagree.
    pub date_time: DateTime<Utc>,
    /// The disagreeing field.
    pub field: CandleField,
    /// Value from the daily archive.
    pub daily: Option<f64>,
    /// Value from the monthly archive.
    pub monthly: Option<f64>,
}

/// Result of one reconciled OHLCV load.
///
/// Carries the gap-free series over `[start, end)`, the Daily/Monthly
/// conflicts found while merging (non-fatal), and per-row attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvReport {
    /// Archive family that was read.
    pub identity: RequestIdentity,
    /// Inclusive start of the requested interval.
    pub start: DateTime<Utc>,
    /// Exclusive end of the requested interval.
    pub end: DateTime<Utc>,
    /// One candle per timeline tick, in canonical column order.
    pub series: CandleSeries,
    /// Disagreements between granularities, ordered by tick then field.
    pub conflicts: Vec<ConflictRecord>,
    /// Which granularity supplied each run of rows.
    pub attribution: Attribution,
}

impl OhlcvReport {
    /// An empty report for `start == end`.
    #[must_use]
    pub fn empty(identity: RequestIdentity, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            identity,
            start,
            end,
            series: CandleSeries::new(),
            conflicts: vec![],
            attribution: Attribution::new(),
        }
    }

    /// Number of distinct ticks with at least one conflict.
    #[must_use]
    pub fn ambiguous_rows(&self) -> usize {
        let mut n = 0;
        let mut last: Option<DateTime<Utc>> = None;
        for c in &self.conflicts {
            if last != Some(c.date_time) {
                n += 1;
                last = Some(c.date_time);
            }
        }
        n
    }
}
