//! Time-series utilities shared by the series builder and the reconciler.
//!
//! - `timeline`: canonical tick sequence for a window and interval
//! - `reconcile`: left-join and Daily-first coalesce of two granularities
//! - `util`: series normalization helpers
/// Canonical timeline construction.
pub mod timeline;
/// Two-granularity reconciliation with conflict detection.
pub mod reconcile;
/// Series normalization helpers.
pub mod util;
