//! klinevault builds gap-free OHLCV series from chunked kline archives.
//!
//! Overview
//! - The vendor publishes each series twice: as daily archives and as
//!   monthly archives. Either may be missing for a given period.
//! - `Vault::load_ohlcv` walks both granularities across the requested
//!   window, aligns them on the canonical timeline, and coalesces every
//!   field Daily-first with Monthly as the fallback.
//! - Ticks present in neither granularity become all-null rows, so the
//!   output always has exactly one row per tick.
//! - Where both granularities carry a row and disagree, the daily value is
//!   kept and the disagreement is reported in `OhlcvReport::conflicts`.
//!
//! Key behaviors and trade-offs
//! - Absent archives are normal and silent; a present but unreadable
//!   archive aborts the whole load.
//! - Spot archives dated 2025 or later carry microsecond epochs; all others
//!   carry milliseconds. The unit is chosen per chunk.
//! - `parallel_granularities` builds the two series on scoped threads;
//!   results are identical to the sequential build.
//!
//! Examples
//! ```rust,ignore
//! use chrono::{TimeZone, Utc};
//! use klinevault::{InstrumentType, Interval, RequestIdentity, Vault};
//!
//! let vault = Vault::open("/data/binance-vision")?;
//! let btc = RequestIdentity::klines(InstrumentType::Spot, Interval::M1, "BTCUSDT");
//! let report = vault.load_ohlcv(
//!     &btc,
//!     Utc.with_ymd_and_hms(2020, 1, 30, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2020, 3, 2, 0, 0, 0).unwrap(),
//! )?;
//! println!("{} rows, {} null cells", report.series.len(), report.series.null_count());
//! ```
//!
//! See `klinevault/examples/` for a runnable demonstration.
#![warn(missing_docs)]

pub(crate) mod core;
mod loader;

pub use core::{Vault, VaultBuilder};
pub use loader::ChunkLookup;

pub use klinevault_fs::FsArchiveStore;

// Re-export core types for convenience
pub use klinevault_core::{
    ArchiveLocator,
    ArchiveStore,
    Attribution,
    CANONICAL_COLUMNS,
    Candle,
    CandleField,
    CandleSeries,
    ConflictRecord,
    ConflictScope,
    DataType,
    Granularity,
    InstrumentType,
    Interval,
    NoProgress,
    OhlcvReport,
    ProgressSink,
    RequestIdentity,
    RowSource,
    Span,
    VaultConfig,
    VaultError,
    // Utilities
    write_canonical_csv,
};

#[cfg(feature = "tracing")]
pub use klinevault_core::TracingProgress;

#[cfg(feature = "dataframe")]
pub use klinevault_core::CandleFrameExt;
