//! Closed enumerations naming an archive family.
//!
//! Each enum renders to the exact spelling used in the vendor's directory
//! layout, and parses back from it.

use core::fmt;
use core::str::FromStr;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::VaultError;

/// Kind of market data stored in an archive family.
///
/// Only [`DataType::Klines`] can be loaded; the other two share the directory
/// layout but carry a different row format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Aggregated trades.
    #[serde(rename = "aggTrades")]
    AggTrades,
    /// OHLCV candles.
    #[serde(rename = "klines")]
    Klines,
    /// Raw trades.
    #[serde(rename = "trades")]
    Trades,
}

impl DataType {
    /// Directory spelling of this data type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AggTrades => "aggTrades",
            Self::Klines => "klines",
            Self::Trades => "trades",
        }
    }
}

/// Instrument family an archive belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentType {
    /// Derivatives (USD-M / COIN-M futures).
    Futures,
    /// Options.
    Option,
    /// Spot markets.
    Spot,
}

impl InstrumentType {
    /// Directory spelling of this instrument type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Futures => "futures",
            Self::Option => "option",
            Self::Spot => "spot",
        }
    }
}

/// Candle sampling interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Interval {
    /// One second.
    #[serde(rename = "1s")]
    S1,
    /// One minute.
    #[serde(rename = "1m")]
    M1,
    /// Three minutes.
    #[serde(rename = "3m")]
    M3,
    /// Five minutes.
    #[serde(rename = "5m")]
    M5,
    /// Fifteen minutes.
    #[serde(rename = "15m")]
    M15,
    /// Thirty minutes.
    #[serde(rename = "30m")]
    M30,
    /// One hour.
    #[serde(rename = "1h")]
    H1,
    /// Two hours.
    #[serde(rename = "2h")]
    H2,
    /// Four hours.
    #[serde(rename = "4h")]
    H4,
    /// Six hours.
    #[serde(rename = "6h")]
    H6,
    /// Eight hours.
    #[serde(rename = "8h")]
    H8,
    /// Twelve hours.
    #[serde(rename = "12h")]
    H12,
    /// One day.
    #[serde(rename = "1d")]
    D1,
    /// Three days.
    #[serde(rename = "3d")]
    D3,
    /// One week.
    #[serde(rename = "1w")]
    W1,
    /// One calendar month.
    #[serde(rename = "1mo")]
    Mo1,
}

impl Interval {
    /// Every supported interval, finest first.
    pub const ALL: [Self; 16] = [
        Self::S1,
        Self::M1,
        Self::M3,
        Self::M5,
        Self::M15,
        Self::M30,
        Self::H1,
        Self::H2,
        Self::H4,
        Self::H6,
        Self::H8,
        Self::H12,
        Self::D1,
        Self::D3,
        Self::W1,
        Self::Mo1,
    ];

    /// Directory and file-name spelling of this interval.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::S1 => "1s",
            Self::M1 => "1m",
            Self::M3 => "3m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1h",
            Self::H2 => "2h",
            Self::H4 => "4h",
            Self::H6 => "6h",
            Self::H8 => "8h",
            Self::H12 => "12h",
            Self::D1 => "1d",
            Self::D3 => "3d",
            Self::W1 => "1w",
            Self::Mo1 => "1mo",
        }
    }

    /// Length in seconds for fixed-length intervals; `None` for `1mo`.
    #[must_use]
    pub const fn seconds(self) -> Option<i64> {
        const MIN: i64 = 60;
        const HOUR: i64 = 3_600;
        const DAY: i64 = 86_400;
        match self {
            Self::S1 => Some(1),
            Self::M1 => Some(MIN),
            Self::M3 => Some(3 * MIN),
            Self::M5 => Some(5 * MIN),
            Self::M15 => Some(15 * MIN),
            Self::M30 => Some(30 * MIN),
            Self::H1 => Some(HOUR),
            Self::H2 => Some(2 * HOUR),
            Self::H4 => Some(4 * HOUR),
            Self::H6 => Some(6 * HOUR),
            Self::H8 => Some(8 * HOUR),
            Self::H12 => Some(12 * HOUR),
            Self::D1 => Some(DAY),
            Self::D3 => Some(3 * DAY),
            Self::W1 => Some(7 * DAY),
            Self::Mo1 => None,
        }
    }

    /// Fixed step between consecutive candles; `None` for calendar months.
    #[must_use]
    pub fn fixed_step(self) -> Option<TimeDelta> {
        self.seconds().and_then(TimeDelta::try_seconds)
    }
}

/// Chunking period at which the vendor publishes archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One archive per calendar day.
    Daily,
    /// One archive per calendar month.
    Monthly,
}

impl Granularity {
    /// Both granularities in merge priority order (Daily wins).
    pub const ALL: [Self; 2] = [Self::Daily, Self::Monthly];

    /// Directory spelling of this granularity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

macro_rules! wire_enum_text {
    ($ty:ty, $variants:expr, $err:expr) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = VaultError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $variants
                    .into_iter()
                    .find(|v: &$ty| v.as_str() == s)
                    .ok_or_else(|| $err(s))
            }
        }
    };
}

wire_enum_text!(
    DataType,
    [DataType::AggTrades, DataType::Klines, DataType::Trades],
    |s: &str| VaultError::InvalidArg(format!("unknown data type: {s}"))
);
wire_enum_text!(
    InstrumentType,
    [
        InstrumentType::Futures,
        InstrumentType::Option,
        InstrumentType::Spot
    ],
    |s: &str| VaultError::InvalidArg(format!("unknown instrument type: {s}"))
);
wire_enum_text!(Interval, Interval::ALL, |s: &str| VaultError::InvalidArg(
    format!("unknown interval: {s}")
));
wire_enum_text!(
    Granularity,
    Granularity::ALL,
    VaultError::unsupported_granularity
);
