//! Request identity selecting one archive family.

use serde::{Deserialize, Serialize};

use crate::market::{DataType, InstrumentType, Interval};

/// Immutable tuple naming which archive family to read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestIdentity {
    /// Kind of data (only `klines` is loadable).
    pub data_type: DataType,
    /// Instrument family.
    pub instrument_type: InstrumentType,
    /// Sampling interval of the candles.
    pub interval: Interval,
    /// Exchange symbol, e.g. `BTCUSDT`.
    pub symbol: String,
}

impl RequestIdentity {
    /// Build an identity for an arbitrary data type.
    pub fn new(
        data_type: DataType,
        instrument_type: InstrumentType,
        interval: Interval,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            data_type,
            instrument_type,
            interval,
            symbol: symbol.into(),
        }
    }

    /// Shorthand for a `klines` identity.
    pub fn klines(
        instrument_type: InstrumentType,
        interval: Interval,
        symbol: impl Into<String>,
    ) -> Self {
        Self::new(DataType::Klines, instrument_type, interval, symbol)
    }

    /// `SYMBOL-interval` label used in logs and progress tasks.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}-{}", self.symbol, self.interval)
    }
}
