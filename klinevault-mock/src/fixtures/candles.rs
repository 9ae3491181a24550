use chrono::{DateTime, TimeDelta, Utc};
use klinevault_core::Candle;

/// A fully populated candle at `at` with prices derived from `px`.
///
/// `close_date_time` is one millisecond before the next minute.
#[must_use]
pub fn candle_at(at: DateTime<Utc>, px: f64) -> Candle {
    Candle {
        date_time: at,
        open: Some(px),
        high: Some(px + 2.0),
        low: Some(px - 2.0),
        close: Some(px + 1.0),
        volume: Some(12.5),
        close_date_time: Some(at + TimeDelta::milliseconds(59_999)),
        quote_volume: Some(px * 12.5),
        trades_count: Some(42),
        taker_buy_base_volume: Some(6.0),
        taker_buy_quote_volume: Some(px * 6.0),
    }
}

/// `count` consecutive one-minute candles from `start`.
///
/// The open price of the k-th candle is `base_px + k`, so every row is
/// distinguishable.
#[must_use]
pub fn minute_candles(start: DateTime<Utc>, count: usize, base_px: f64) -> Vec<Candle> {
    (0..count)
        .map(|k| {
            let k = i64::try_from(k).unwrap_or(i64::MAX);
            #[allow(clippy::cast_precision_loss)]
            let px = base_px + k as f64;
            candle_at(start + TimeDelta::minutes(k), px)
        })
        .collect()
}
