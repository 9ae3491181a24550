use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    Attribution, Candle, CandleField, CandleSeries, ConflictRecord, ConflictScope, RowSource,
};

/// Output of [`reconcile`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// One candle per timeline tick.
    pub series: CandleSeries,
    /// Disagreements found where both sides had a row, by tick then field.
    pub conflicts: Vec<ConflictRecord>,
    /// Source of each run of output rows.
    pub attribution: Attribution,
}

/// Null-aware inequality of one field: two nulls are equal, a null and a
/// value differ, and two `NaN`s are treated as equal. Counts compare as
/// integers.
fn differs(d: &Candle, m: &Candle, field: CandleField) -> bool {
    if field == CandleField::TradesCount {
        return d.trades_count != m.trades_count;
    }
    match (d.field(field), m.field(field)) {
        (None, None) => false,
        (Some(x), Some(y)) => !(x == y || (x.is_nan() && y.is_nan())),
        _ => true,
    }
}

fn coalesce(daily: Option<&Candle>, monthly: Option<&Candle>, ts: DateTime<Utc>) -> Candle {
    let (d, m) = match (daily, monthly) {
        (Some(d), Some(m)) => (d, m),
        (Some(only), None) | (None, Some(only)) => return Candle { date_time: ts, ..*only },
        (None, None) => return Candle::missing(ts),
    };
    Candle {
        date_time: ts,
        open: d.open.or(m.open),
        high: d.high.or(m.high),
        low: d.low.or(m.low),
        close: d.close.or(m.close),
        volume: d.volume.or(m.volume),
        close_date_time: d.close_date_time.or(m.close_date_time),
        quote_volume: d.quote_volume.or(m.quote_volume),
        trades_count: d.trades_count.or(m.trades_count),
        taker_buy_base_volume: d.taker_buy_base_volume.or(m.taker_buy_base_volume),
        taker_buy_quote_volume: d.taker_buy_quote_volume.or(m.taker_buy_quote_volume),
    }
}

/// Left-join `daily` and `monthly` onto `timeline` and coalesce field-wise,
/// Daily first.
///
/// Behavior:
/// - The output has exactly one candle per timeline tick, in timeline
///   order, with `date_time` equal to the tick.
/// - Rows whose `date_time` is not a tick are ignored.
/// - For each field the daily value is used when non-null, otherwise the
///   monthly value, otherwise null. A tick matched by neither side is
///   all-null.
/// - Where both sides matched, every field in `scope` that differs under
///   null-aware inequality produces one [`ConflictRecord`]. The output row
///   still carries the daily value.
///
/// `timeline` must be strictly ascending.
#[must_use]
pub fn reconcile(
    timeline: &[DateTime<Utc>],
    daily: &CandleSeries,
    monthly: &CandleSeries,
    scope: ConflictScope,
) -> Reconciliation {
    let daily_by_ts: BTreeMap<DateTime<Utc>, &Candle> =
        daily.iter().map(|c| (c.date_time, c)).collect();
    let monthly_by_ts: BTreeMap<DateTime<Utc>, &Candle> =
        monthly.iter().map(|c| (c.date_time, c)).collect();

    let mut rows = Vec::with_capacity(timeline.len());
    let mut conflicts = Vec::new();
    let mut attribution = Attribution::new();

    for &ts in timeline {
        let d = daily_by_ts.get(&ts).copied();
        let m = monthly_by_ts.get(&ts).copied();

        let source = match (d, m) {
            (Some(_), _) => RowSource::Daily,
            (None, Some(_)) => RowSource::Monthly,
            (None, None) => RowSource::Missing,
        };
        attribution.push_row(source, ts);

        if let (Some(d), Some(m)) = (d, m) {
            conflicts.extend(
                scope
                    .fields()
                    .iter()
                    .copied()
                    .filter(|&f| differs(d, m, f))
                    .map(|field: CandleField| ConflictRecord {
                        date_time: ts,
                        field,
                        daily: d.field(field),
                        monthly: m.field(field),
                    }),
            );
        }
        rows.push(coalesce(d, m, ts));
    }

    Reconciliation {
        series: crate::timeseries::util::dedup_first_wins(rows).0,
        conflicts,
        attribution,
    }
}
