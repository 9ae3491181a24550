//! Deterministic fixture builders: candles, raw kline CSV, and zip archives.

mod archive;
mod candles;

pub use archive::{kline_csv, write_archive, zip_member};
pub use candles::{candle_at, minute_candles};
