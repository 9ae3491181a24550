//! klinevault-core
//!
//! Core building blocks for loading chunked OHLCV archives.
//!
//! - `calendar`: chunk boundaries and archive date keys per granularity.
//! - `locator`: the vendor path convention for one chunk.
//! - `store`: the `ArchiveStore` and `ProgressSink` collaborator traits.
//! - `codec`: raw kline row decoding and canonical CSV export.
//! - `timeseries`: canonical timelines and two-granularity reconciliation.
//!
//! The data model (candles, identities, errors, config) lives in
//! `klinevault-types` and is re-exported here.
#![warn(missing_docs)]

/// Chunk calendar rules.
pub mod calendar;
/// Vendor row codec.
pub mod codec;
/// Polars interop, behind the `dataframe` feature.
#[cfg(feature = "dataframe")]
pub mod dataframe;
/// Archive locators.
pub mod locator;
/// Collaborator traits.
pub mod store;
/// Time-series utilities for timelines and reconciliation.
pub mod timeseries;

pub use calendar::{GranularityCalendar, file_date_key, file_date_key_for, next_boundary};
pub use codec::{EpochUnit, decode_klines, write_canonical_csv};
#[cfg(feature = "dataframe")]
pub use dataframe::CandleFrameExt;
pub use klinevault_types::*;
pub use locator::ArchiveLocator;
#[cfg(feature = "tracing")]
pub use store::TracingProgress;
pub use store::{ArchiveStore, NoProgress, ProgressSink};
pub use timeseries::reconcile::{Reconciliation, reconcile};
pub use timeseries::timeline::canonical_timeline;
pub use timeseries::util::dedup_first_wins;
