//! Shared klinevault data model: candles, request identities, errors,
//! configuration primitives, and report envelopes.
#![warn(missing_docs)]

mod attribution;
mod candle;
mod config;
mod error;
mod identity;
mod market;
mod reports;

pub use attribution::{Attribution, RowSource, Span};
pub use candle::{CANONICAL_COLUMNS, Candle, CandleField, CandleSeries};
pub use config::{ConflictScope, VaultConfig};
pub use error::VaultError;
pub use identity::RequestIdentity;
pub use market::{DataType, Granularity, InstrumentType, Interval};
pub use reports::{ConflictRecord, OhlcvReport};
