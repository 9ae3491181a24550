//! OHLCV candle records and ordered candle series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::VaultError;

/// Canonical output column order. Consumers may rely on it.
pub const CANONICAL_COLUMNS: [&str; 11] = [
    "date_time",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "close_date_time",
    "quote_volume",
    "trades_count",
    "taker_buy_base_volume",
    "taker_buy_quote_volume",
];

/// One OHLCV candle keyed by its open time.
///
/// Every column but `date_time` is nullable: rows synthesised for timeline
/// ticks without source data carry nulls throughout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Candle open time.
    pub date_time: DateTime<Utc>,
    /// Opening price.
    pub open: Option<f64>,
    /// Highest price.
    pub high: Option<f64>,
    /// Lowest price.
    pub low: Option<f64>,
    /// Closing price.
    pub close: Option<f64>,
    /// Base asset volume.
    pub volume: Option<f64>,
    /// Candle close time.
    pub close_date_time: Option<DateTime<Utc>>,
    /// Quote asset volume.
    pub quote_volume: Option<f64>,
    /// Number of trades.
    pub trades_count: Option<i64>,
    /// Taker buy base asset volume.
    pub taker_buy_base_volume: Option<f64>,
    /// Taker buy quote asset volume.
    pub taker_buy_quote_volume: Option<f64>,
}

impl Candle {
    /// Number of nullable columns in a candle.
    pub const NULLABLE_COLUMNS: usize = CANONICAL_COLUMNS.len() - 1;

    /// A candle at `date_time` with every other column null.
    #[must_use]
    pub const fn missing(date_time: DateTime<Utc>) -> Self {
        Self {
            date_time,
            open: None,
            high: None,
            low: None,
            close: None,
            volume: None,
            close_date_time: None,
            quote_volume: None,
            trades_count: None,
            taker_buy_base_volume: None,
            taker_buy_quote_volume: None,
        }
    }

    /// Read a numeric field. `trades_count` is widened to `f64`, which is
    /// lossy above 2^53.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn field(&self, field: CandleField) -> Option<f64> {
        match field {
            CandleField::Open => self.open,
            CandleField::High => self.high,
            CandleField::Low => self.low,
            CandleField::Close => self.close,
            CandleField::Volume => self.volume,
            CandleField::QuoteVolume => self.quote_volume,
            CandleField::TradesCount => self.trades_count.map(|n| n as f64),
            CandleField::TakerBuyBaseVolume => self.taker_buy_base_volume,
            CandleField::TakerBuyQuoteVolume => self.taker_buy_quote_volume,
        }
    }

    /// Count of null cells among the nullable columns.
    #[must_use]
    pub fn null_count(&self) -> usize {
        let numeric = CandleField::ALL
            .iter()
            .filter(|f| self.field(**f).is_none())
            .count();
        numeric + usize::from(self.close_date_time.is_none())
    }

    /// True when every nullable column is null.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.null_count() == Self::NULLABLE_COLUMNS
    }
}

/// Numeric candle fields that can be compared across sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandleField {
    /// `open`
    Open,
    /// `high`
    High,
    /// `low`
    Low,
    /// `close`
    Close,
    /// `volume`
    Volume,
    /// `quote_volume`
    QuoteVolume,
    /// `trades_count`
    TradesCount,
    /// `taker_buy_base_volume`
    TakerBuyBaseVolume,
    /// `taker_buy_quote_volume`
    TakerBuyQuoteVolume,
}

impl CandleField {
    /// The five core OHLCV fields.
    pub const CORE: [Self; 5] = [Self::Open, Self::High, Self::Low, Self::Close, Self::Volume];

    /// Every numeric field in canonical column order.
    pub const ALL: [Self; 9] = [
        Self::Open,
        Self::High,
        Self::Low,
        Self::Close,
        Self::Volume,
        Self::QuoteVolume,
        Self::TradesCount,
        Self::TakerBuyBaseVolume,
        Self::TakerBuyQuoteVolume,
    ];

    /// Column name of this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
            Self::QuoteVolume => "quote_volume",
            Self::TradesCount => "trades_count",
            Self::TakerBuyBaseVolume => "taker_buy_base_volume",
            Self::TakerBuyQuoteVolume => "taker_buy_quote_volume",
        }
    }
}

impl core::fmt::Display for CandleField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candles strictly ascending by `date_time`, no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Candle>", into = "Vec<Candle>")]
pub struct CandleSeries(Vec<Candle>);

impl CandleSeries {
    /// An empty series.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Wrap candles that are already strictly ascending.
    ///
    /// # Errors
    /// Returns `InvalidArg` naming the first offending timestamp when the
    /// candles are out of order or contain a duplicate `date_time`.
    pub fn from_sorted(candles: Vec<Candle>) -> Result<Self, VaultError> {
        if let Some(w) = candles.windows(2).find(|w| w[0].date_time >= w[1].date_time) {
            return Err(VaultError::InvalidArg(format!(
                "candle series not strictly ascending at {}",
                w[1].date_time
            )));
        }
        Ok(Self(candles))
    }

    /// Append `candle` if it is strictly after the current last candle.
    ///
    /// Returns `false` and leaves the series untouched otherwise.
    pub fn push_after(&mut self, candle: Candle) -> bool {
        if self.0.last().is_some_and(|l| candle.date_time <= l.date_time) {
            return false;
        }
        self.0.push(candle);
        true
    }

    /// Number of candles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the series has no candles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the candles.
    #[must_use]
    pub fn as_slice(&self) -> &[Candle] {
        &self.0
    }

    /// Iterate candles in ascending time order.
    pub fn iter(&self) -> std::slice::Iter<'_, Candle> {
        self.0.iter()
    }

    /// First candle, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Candle> {
        self.0.first()
    }

    /// Last candle, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Candle> {
        self.0.last()
    }

    /// Total null cells across all nullable columns.
    #[must_use]
    pub fn null_count(&self) -> usize {
        self.0.iter().map(Candle::null_count).sum()
    }

    /// Non-null cell count per nullable column, in canonical order
    /// (`date_time` excluded).
    #[must_use]
    pub fn non_null_counts(&self) -> [usize; Candle::NULLABLE_COLUMNS] {
        let mut out = [0usize; Candle::NULLABLE_COLUMNS];
        for c in &self.0 {
            let present = [
                c.open.is_some(),
                c.high.is_some(),
                c.low.is_some(),
                c.close.is_some(),
                c.volume.is_some(),
                c.close_date_time.is_some(),
                c.quote_volume.is_some(),
                c.trades_count.is_some(),
                c.taker_buy_base_volume.is_some(),
                c.taker_buy_quote_volume.is_some(),
            ];
            for (slot, p) in out.iter_mut().zip(present) {
                *slot += usize::from(p);
            }
        }
        out
    }

    /// Unwrap into the underlying vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<Candle> {
        self.0
    }
}

impl TryFrom<Vec<Candle>> for CandleSeries {
    type Error = VaultError;

    fn try_from(candles: Vec<Candle>) -> Result<Self, Self::Error> {
        Self::from_sorted(candles)
    }
}

impl From<CandleSeries> for Vec<Candle> {
    fn from(s: CandleSeries) -> Self {
        s.0
    }
}

impl<'a> IntoIterator for &'a CandleSeries {
    type Item = &'a Candle;
    type IntoIter = std::slice::Iter<'a, Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for CandleSeries {
    type Item = Candle;
    type IntoIter = std::vec::IntoIter<Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
